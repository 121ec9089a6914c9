// src/framebuffer.rs

//! Packed 1-bit-per-pixel raster.
//!
//! ## Packing
//!
//! Rows are stored top to bottom, each row occupying `stride = ceil(width / 8)`
//! bytes. Within a row, pixel `x` lives in byte `x / 8` at bit `7 - x % 8`
//! (most-significant bit first). This is the layout an SSD1306 host driver
//! expects for a horizontally addressed monochrome bitmap and it must stay
//! bit-exact.
//!
//! Padding bits at the end of a row (when `width` is not a multiple of 8) are
//! never set by drawing operations, and `from_packed` rejects input that sets
//! them.

use crate::color::BinaryColor;
use crate::error::{RasterError, Result};
use log::trace;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    stride: usize,
    pixels: Box<[u8]>,
}

impl Framebuffer {
    /// Creates a raster with every pixel set to the background.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let (width, height) = checked_dimensions(width, height)?;
        let stride = stride_for(width);
        trace!("Framebuffer::new {}x{} (stride {})", width, height, stride);
        Ok(Self {
            width,
            height,
            stride,
            pixels: vec![0u8; stride * height].into_boxed_slice(),
        })
    }

    /// Rebuilds a raster from packed bytes, e.g. after decoding.
    ///
    /// The byte count must be exactly `ceil(width / 8) * height` and the
    /// padding bits of every row must be clear.
    pub fn from_packed(width: i32, height: i32, bytes: Vec<u8>) -> Result<Self> {
        let (width, height) = checked_dimensions(width, height)?;
        let stride = stride_for(width);
        let expected = stride * height;
        if bytes.len() != expected {
            return Err(RasterError::Encoding(format!(
                "expected {} packed bytes for a {}x{} raster, got {}",
                expected,
                width,
                height,
                bytes.len()
            )));
        }
        if width % 8 != 0 {
            let mask = 0xFFu8 >> (width % 8);
            if let Some(row) = bytes
                .chunks_exact(stride)
                .position(|row| row[stride - 1] & mask != 0)
            {
                return Err(RasterError::Encoding(format!(
                    "row {} sets padding bits beyond width {}",
                    row, width
                )));
            }
        }
        Ok(Self {
            width,
            height,
            stride,
            pixels: bytes.into_boxed_slice(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Sets one pixel. Coordinates outside the raster are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if let Some((index, mask)) = self.locate(x, y) {
            match color {
                BinaryColor::On => self.pixels[index] |= mask,
                BinaryColor::Off => self.pixels[index] &= !mask,
            }
        }
    }

    /// Reads one pixel. Coordinates outside the raster read as background.
    pub fn get_pixel(&self, x: i32, y: i32) -> BinaryColor {
        match self.locate(x, y) {
            Some((index, mask)) => BinaryColor::from(self.pixels[index] & mask != 0),
            None => BinaryColor::BACKGROUND,
        }
    }

    /// Fills the half-open rectangle `[x0, x1) x [y0, y1)` clipped to the raster.
    ///
    /// Corners may be given in any order; an empty intersection does nothing.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: BinaryColor) {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));

        let left = clamp_to(left, self.width);
        let right = clamp_to(right, self.width);
        let top = clamp_to(top, self.height);
        let bottom = clamp_to(bottom, self.height);
        if left >= right || top >= bottom {
            return;
        }

        for row in top..bottom {
            self.fill_span(row, left, right, color);
        }
    }

    /// Sets every pixel to `color`.
    pub fn fill(&mut self, color: BinaryColor) {
        match color {
            BinaryColor::Off => self.pixels.fill(0),
            BinaryColor::On => {
                for row in 0..self.height {
                    self.fill_span(row, 0, self.width, color);
                }
            }
        }
    }

    /// Sets the pixels `[left, right)` of `row`. Bounds must already be clipped.
    pub(crate) fn fill_span(&mut self, row: usize, left: usize, right: usize, color: BinaryColor) {
        if left >= right {
            return;
        }
        let row_start = row * self.stride;
        let first = left / 8;
        let last = (right - 1) / 8;
        for byte in first..=last {
            let lo = if byte == first { left % 8 } else { 0 };
            let hi = if byte == last { (right - 1) % 8 } else { 7 };
            // Bits lo..=hi counted from the MSB.
            let mask = (0xFFu8 >> lo) & (0xFFu8 << (7 - hi));
            let cell = &mut self.pixels[row_start + byte];
            match color {
                BinaryColor::On => *cell |= mask,
                BinaryColor::Off => *cell &= !mask,
            }
        }
    }

    /// The packed bytes, `stride * height` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels.into_vec()
    }

    /// Number of foreground pixels.
    pub fn count_on(&self) -> usize {
        self.pixels.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Binary PBM (P4) image of the raster, for debugging on a desktop.
    ///
    /// PBM treats 1 as black, so bits are inverted to keep lit pixels light.
    pub fn to_pbm(&self) -> Vec<u8> {
        let header = format!("P4\n{} {}\n", self.width, self.height);
        let mut out = Vec::with_capacity(header.len() + self.pixels.len());
        out.extend_from_slice(header.as_bytes());
        out.extend(self.pixels.iter().map(|b| !b));
        out
    }

    /// One text line per row, `#` for foreground and `.` for background.
    pub fn ascii_preview(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                out.push(if self.get_pixel(x, y).is_on() { '#' } else { '.' });
            }
            let _ = writeln!(out);
        }
        out
    }

    /// Byte index and bit mask for an in-range coordinate.
    #[inline]
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.stride + x / 8, 0x80u8 >> (x % 8)))
    }
}

fn checked_dimensions(width: i32, height: i32) -> Result<(usize, usize)> {
    if width <= 0 || height <= 0 {
        return Err(RasterError::InvalidDimension {
            width: width as i64,
            height: height as i64,
        });
    }
    Ok((width as usize, height as usize))
}

/// Row stride in bytes: `ceil(width / 8)`.
pub const fn stride_for(width: usize) -> usize {
    width.div_ceil(8)
}

fn clamp_to(v: i32, limit: usize) -> usize {
    if v <= 0 {
        0
    } else {
        (v as usize).min(limit)
    }
}
