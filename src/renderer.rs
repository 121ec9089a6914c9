// src/renderer.rs

//! Centered single-line text rendering.
//!
//! The renderer measures the text with the requested font size, centers it
//! horizontally, puts the baseline a fixed distance above the bottom edge and
//! draws it in the foreground color on a cleared canvas.

use crate::canvas::Canvas;
use crate::color::BinaryColor;
use crate::error::{RasterError, Result};
use crate::framebuffer::Framebuffer;
use crate::rasterizer::FontProvider;
use log::{debug, info};

/// What to draw and where the baseline goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRequest<'a> {
    /// Normally a single emoji or character.
    pub text: &'a str,
    /// Font size; one em equals this many pixels.
    pub point_size: i32,
    /// Distance in pixels from the bottom edge up to the baseline.
    pub baseline_offset: i32,
}

/// Computed text origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub measured_width: i32,
    /// May be negative or beyond the raster; the text is then clipped.
    pub origin_x: i32,
    pub origin_y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRenderer {
    width: i32,
    height: i32,
}

impl GlyphRenderer {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(RasterError::InvalidDimension {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(Self { width, height })
    }

    /// Centers a run of `measured_width` pixels and places the baseline.
    ///
    /// `origin_x = floor((width - measured_width) / 2)`,
    /// `origin_y = height - baseline_offset`.
    pub fn place(&self, measured_width: i32, baseline_offset: i32) -> Result<Placement> {
        let origin_x = (self.width as i64 - measured_width as i64).div_euclid(2);
        let origin_y = self.height as i64 - baseline_offset as i64;
        let origin_y = i32::try_from(origin_y).map_err(|_| {
            RasterError::InvalidArgument(format!("baseline offset {} is out of range", baseline_offset))
        })?;
        Ok(Placement {
            measured_width,
            // Half the difference of two i32 values fits in i32.
            origin_x: origin_x as i32,
            origin_y,
        })
    }

    /// Renders `request` onto a fresh canvas.
    ///
    /// Empty text yields an all-background raster without touching the font.
    pub fn render(&self, request: &GlyphRequest<'_>, fonts: &dyn FontProvider) -> Result<Framebuffer> {
        if request.point_size <= 0 {
            return Err(RasterError::InvalidArgument(format!(
                "point size must be positive, got {}",
                request.point_size
            )));
        }

        let mut canvas = Canvas::new(self.width, self.height)?;
        canvas.clear(BinaryColor::BACKGROUND);

        if request.text.is_empty() {
            debug!("GlyphRenderer: Empty text, returning blank raster");
            return Ok(canvas.into_framebuffer());
        }

        let font = fonts.sized(request.point_size)?;
        let placement = self.place(font.measure(request.text), request.baseline_offset)?;
        info!(
            "GlyphRenderer: {:?} at {}px, width {} -> origin ({}, {})",
            request.text,
            request.point_size,
            placement.measured_width,
            placement.origin_x,
            placement.origin_y
        );

        canvas.draw_text(
            request.text,
            placement.origin_x,
            placement.origin_y,
            font.as_ref(),
            BinaryColor::FOREGROUND,
        );
        Ok(canvas.into_framebuffer())
    }
}

#[cfg(test)]
mod tests;
