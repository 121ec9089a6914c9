// src/lib.rs

//! Monochrome raster generation for small 1-bit displays.
//!
//! Text (typically a single emoji) or a drawing script is rendered into a
//! packed framebuffer and returned as a Base64 payload that a display driver
//! can push to the panel unchanged.

pub mod canvas;
pub mod color;
pub mod config;
pub mod encoder;
pub mod error;
pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;
pub mod script;
pub mod service;

pub use canvas::Canvas;
pub use color::BinaryColor;
pub use config::{Config, CONFIG};
pub use encoder::{decode, encode, EncodedPayload};
pub use error::{ErrorKind, RasterError};
pub use framebuffer::Framebuffer;
pub use renderer::{GlyphRenderer, GlyphRequest};
pub use script::{ScriptRunner, SINE_WAVE};
pub use service::{RasterService, Response, SERVICE};

/// Renders centered text with the process-wide service.
pub fn render_text(
    text: &str,
    point_size: i32,
    baseline_offset: i32,
) -> Result<EncodedPayload, RasterError> {
    SERVICE.render_text(text, point_size, baseline_offset)
}

/// Runs a drawing script with the process-wide service.
pub fn render_script(source: &str) -> Result<EncodedPayload, RasterError> {
    SERVICE.render_script(source)
}
