// src/canvas.rs

//! Drawing surface over one framebuffer.
//!
//! The canvas is what both the glyph renderer and the script bindings draw
//! through. It owns its framebuffer exclusively; handing the raster on to the
//! encoder consumes the canvas.

use crate::color::BinaryColor;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::rasterizer::{self, GlyphSource};
use log::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    framebuffer: Framebuffer,
}

impl Canvas {
    /// Creates a canvas over a fresh background-filled framebuffer.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Ok(Self::from_framebuffer(Framebuffer::new(width, height)?))
    }

    pub fn from_framebuffer(framebuffer: Framebuffer) -> Self {
        Self { framebuffer }
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width()
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height()
    }

    /// Fills the whole raster with one value.
    pub fn clear(&mut self, color: BinaryColor) {
        self.framebuffer.fill(color);
    }

    /// Out-of-range coordinates are a no-op.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        self.framebuffer.set_pixel(x, y, color);
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> BinaryColor {
        self.framebuffer.get_pixel(x, y)
    }

    /// Half-open rectangle `[x0, x1) x [y0, y1)`, clipped to the raster.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: BinaryColor) {
        self.framebuffer.fill_rect(x0, y0, x1, y1, color);
    }

    /// Draws `text` with its first glyph's origin at `(x, y)` on the baseline.
    ///
    /// Glyphs the font cannot resolve are skipped and take no space; the rest
    /// of the string still renders. Text running off the raster is clipped.
    pub fn draw_text<F: GlyphSource + ?Sized>(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font: &F,
        color: BinaryColor,
    ) {
        let layout = rasterizer::layout(font, text);
        let skipped = text.chars().count() - layout.glyphs.len();
        if skipped > 0 {
            debug!("Canvas: {} character(s) of {:?} have no glyph", skipped, text);
        }

        for (ch, pen_x) in layout.glyphs {
            let Some(segments) = font.outline(ch) else {
                continue;
            };
            trace!("Canvas: '{}' at pen x {:.2}", ch, x as f32 + pen_x);
            rasterizer::fill_outline(
                &mut self.framebuffer,
                &segments,
                x as f32 + pen_x,
                y as f32,
                color,
            );
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Ends drawing and yields the raster.
    pub fn into_framebuffer(self) -> Framebuffer {
        self.framebuffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BinaryColor::{Off, On};
    use crate::config::FontFailurePolicy;
    use crate::rasterizer::{FontManager, FontProvider, FontSpec, HeadlessFontDriver};
    use std::path::PathBuf;

    fn font(driver: HeadlessFontDriver, size: i32) -> Box<dyn GlyphSource> {
        let spec = FontSpec {
            path: PathBuf::from("headless"),
            face_index: 0,
        };
        FontManager::new(driver, spec, FontFailurePolicy::Fatal)
            .sized(size)
            .unwrap()
    }

    #[test]
    fn clear_is_idempotent_over_any_content() {
        let mut canvas = Canvas::new(19, 7).unwrap();
        canvas.fill_rect(0, 0, 10, 3, On);
        canvas.set_pixel(18, 6, On);
        for background in [Off, On, Off] {
            canvas.clear(background);
            canvas.clear(background);
            for y in 0..7 {
                for x in 0..19 {
                    assert_eq!(canvas.get_pixel(x, y), background);
                }
            }
        }
    }

    #[test]
    fn draw_text_renders_each_glyph_at_its_advance() {
        let font = font(HeadlessFontDriver::new(), 10);
        let mut canvas = Canvas::new(64, 16).unwrap();
        canvas.draw_text("AB", 0, 12, font.as_ref(), On);
        // Each box is 8 px wide (x 1..9 within a 10 px advance) and 7 px tall.
        assert_eq!(canvas.framebuffer().count_on(), 2 * 8 * 7);
        assert!(canvas.get_pixel(1, 11).is_on());
        assert!(canvas.get_pixel(11, 11).is_on());
        assert!(!canvas.get_pixel(9, 11).is_on());
        assert!(!canvas.get_pixel(10, 11).is_on());
    }

    #[test]
    fn missing_glyph_is_skipped_not_fatal() {
        let font = font(HeadlessFontDriver::new().with_missing(['?']), 10);

        let mut with_missing = Canvas::new(64, 16).unwrap();
        with_missing.draw_text("A?B", 0, 12, font.as_ref(), On);

        let mut without = Canvas::new(64, 16).unwrap();
        without.draw_text("AB", 0, 12, font.as_ref(), On);

        assert_eq!(with_missing, without);

        let mut only_missing = Canvas::new(64, 16).unwrap();
        only_missing.draw_text("???", 0, 12, font.as_ref(), On);
        assert_eq!(only_missing.framebuffer().count_on(), 0);
    }

    #[test]
    fn text_partially_off_canvas_is_clipped() {
        let font = font(HeadlessFontDriver::new(), 10);
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.draw_text("A", -5, 12, font.as_ref(), On);
        // Box columns -4..4 survive as 0..4.
        assert_eq!(canvas.framebuffer().count_on(), 4 * 7);
    }

    #[test]
    fn background_text_erases() {
        let font = font(HeadlessFontDriver::new(), 10);
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.clear(On);
        canvas.draw_text("A", 0, 12, font.as_ref(), Off);
        assert_eq!(canvas.framebuffer().count_on(), 16 * 16 - 8 * 7);
    }
}
