// src/encoder.rs

//! Text encoding of finished rasters.
//!
//! The wire form is standard Base64 (RFC 4648 alphabet, `=` padding, no line
//! breaks) over the packed framebuffer bytes. Width and height are not part of
//! the payload; both sides agree on them out of band.

use crate::error::{RasterError, Result};
use crate::framebuffer::Framebuffer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::trace;
use serde::Serialize;
use std::fmt;

/// Base64 text of one packed raster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encodes a finished raster. The framebuffer is consumed; it cannot be drawn
/// on after encoding.
pub fn encode(framebuffer: Framebuffer) -> EncodedPayload {
    let text = STANDARD.encode(framebuffer.as_bytes());
    trace!(
        "encode: {}x{} raster -> {} chars",
        framebuffer.width(),
        framebuffer.height(),
        text.len()
    );
    EncodedPayload(text)
}

/// Decodes a payload back into a `width` x `height` raster.
pub fn decode(payload: &str, width: i32, height: i32) -> Result<Framebuffer> {
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| RasterError::Encoding(format!("invalid base64 payload: {}", e)))?;
    Framebuffer::from_packed(width, height, bytes)
}
