// src/rasterizer/mod.rs

//! Glyph outlines and their 1-bit rasterization.
//!
//! Text reaches the raster in three steps:
//!
//! ```text
//! FontDriver  →  FontManager/ScaledFont  →  fill_outline
//!  (font units)      (pixel units)           (packed bits)
//! ```
//!
//! The font side is reached through two small traits so the canvas, the
//! renderer and the script bindings never see a concrete font backend:
//! [`FontProvider`] hands out a [`GlyphSource`] for one point size.

pub mod curves;
pub mod font_driver;
pub mod font_manager;
pub mod headless_font_driver;
pub mod outline;
pub mod ttf_font_driver;

use crate::color::BinaryColor;
use crate::error::RasterError;
use crate::framebuffer::Framebuffer;
use curves::{Crossing, Segment};

pub use font_driver::{FontDriver, FontSpec, GlyphId};
pub use font_manager::{FontManager, ScaledFont};
pub use headless_font_driver::HeadlessFontDriver;
pub use ttf_font_driver::{TtfFont, TtfFontDriver};

/// Glyph metrics and outlines at a fixed pixel size.
///
/// Outlines are in pixels with y pointing up and the pen position on the
/// baseline at the origin.
pub trait GlyphSource {
    /// Horizontal advance in pixels, or `None` if the font cannot render `ch`.
    fn advance(&self, ch: char) -> Option<f32>;

    /// Outline segments, or `None` if `ch` is missing or has no visible shape.
    fn outline(&self, ch: char) -> Option<Vec<Segment>>;

    /// Pen adjustment between two adjacent characters in pixels.
    fn kerning(&self, _left: char, _right: char) -> f32 {
        0.0
    }

    /// Width of `text` in whole pixels.
    fn measure(&self, text: &str) -> i32 {
        layout(self, text).width.round() as i32
    }
}

/// Gives out glyph sources for a requested point size.
pub trait FontProvider: Send + Sync {
    fn sized(&self, point_size: i32) -> Result<Box<dyn GlyphSource>, RasterError>;
}

/// Pen positions of the renderable characters in a string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// `(character, pen x)` for each character the font covers.
    pub glyphs: Vec<(char, f32)>,
    /// Total advance in pixels.
    pub width: f32,
}

/// Lays `text` out on a single line.
///
/// Characters without coverage are skipped: they take no space and draw
/// nothing.
pub fn layout<S: GlyphSource + ?Sized>(source: &S, text: &str) -> TextLayout {
    let mut glyphs = Vec::new();
    let mut pen = 0.0f32;
    let mut previous: Option<char> = None;
    for ch in text.chars() {
        let Some(advance) = source.advance(ch) else {
            continue;
        };
        if let Some(prev) = previous {
            pen += source.kerning(prev, ch);
        }
        glyphs.push((ch, pen));
        pen += advance;
        previous = Some(ch);
    }
    TextLayout { glyphs, width: pen }
}

/// Fills the interior of an outline into the raster.
///
/// Uses the non-zero winding rule sampled at pixel centers; there is no
/// anti-aliasing. `(origin_x, baseline_y)` is where the glyph origin lands in
/// raster coordinates (y down). Parts outside the raster are dropped.
pub fn fill_outline(
    fb: &mut Framebuffer,
    segments: &[Segment],
    origin_x: f32,
    baseline_y: f32,
    color: BinaryColor,
) {
    if segments.is_empty() {
        return;
    }
    let (_, y_min, _, y_max) = segments.iter().map(Segment::bounds).fold(
        (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        |(ax0, ay0, ax1, ay1), (x0, y0, x1, y1)| (ax0.min(x0), ay0.min(y0), ax1.max(x1), ay1.max(y1)),
    );

    // Row centers (py + 0.5) map to glyph y = baseline_y - (py + 0.5).
    let first_row = ((baseline_y - y_max - 0.5).floor() as i64).max(0);
    let last_row = ((baseline_y - y_min - 0.5).ceil() as i64).min(fb.height() as i64 - 1);
    if first_row > last_row {
        return;
    }

    let width = fb.width() as i64;
    let mut crossings: Vec<Crossing> = Vec::with_capacity(16);
    for row in first_row..=last_row {
        let gy = baseline_y - (row as f32 + 0.5);
        crossings.clear();
        for segment in segments {
            segment.crossings(gy, &mut crossings);
        }
        if crossings.len() < 2 {
            continue;
        }
        crossings.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut winding = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].winding;
            if winding == 0 {
                continue;
            }
            // Pixel centers px + 0.5 inside [x_a, x_b).
            let left = ((pair[0].x + origin_x - 0.5).ceil() as i64).clamp(0, width);
            let right = ((pair[1].x + origin_x - 0.5).ceil() as i64).clamp(0, width);
            if left < right {
                fb.fill_span(row as usize, left as usize, right as usize, color);
            }
        }
    }
}
