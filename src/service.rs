// src/service.rs

//! Host-facing entry points.
//!
//! A [`RasterService`] ties the configured raster size, font provider and
//! script limits together. Every entry point returns exactly one encoded
//! payload or one [`RasterError`]; [`Response`] is the serialized form hosts
//! consume.

use crate::config::{Config, CONFIG};
use crate::encoder::{self, EncodedPayload};
use crate::error::{ErrorKind, RasterError, Result};
use crate::framebuffer::Framebuffer;
use crate::rasterizer::{FontManager, FontProvider, TtfFontDriver};
use crate::renderer::{GlyphRenderer, GlyphRequest};
use crate::script::ScriptRunner;
use log::{debug, warn};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;

/// Service built from [`CONFIG`] on first use.
pub static SERVICE: Lazy<RasterService> = Lazy::new(|| RasterService::new(CONFIG.clone()));

pub struct RasterService {
    config: Config,
    fonts: Arc<dyn FontProvider>,
}

impl RasterService {
    /// Uses the TrueType font named in `config.font`, loaded on first use.
    pub fn new(config: Config) -> Self {
        let fonts = Arc::new(FontManager::from_config(TtfFontDriver, &config.font));
        Self { config, fonts }
    }

    pub fn with_font_provider(config: Config, fonts: Arc<dyn FontProvider>) -> Self {
        Self { config, fonts }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Renders `text` centered, with its baseline `baseline_offset` pixels
    /// above the bottom edge.
    pub fn rasterize_text(
        &self,
        text: &str,
        point_size: i32,
        baseline_offset: i32,
    ) -> Result<Framebuffer> {
        let renderer = GlyphRenderer::new(self.config.display.width, self.config.display.height)?;
        renderer.render(
            &GlyphRequest {
                text,
                point_size,
                baseline_offset,
            },
            self.fonts.as_ref(),
        )
    }

    /// Runs a drawing script on a fresh raster.
    pub fn rasterize_script(&self, source: &str) -> Result<Framebuffer> {
        ScriptRunner::new(
            self.config.display.width,
            self.config.display.height,
            self.config.script,
        )?
        .with_fonts(Arc::clone(&self.fonts))
        .run(source)
    }

    pub fn render_text(
        &self,
        text: &str,
        point_size: i32,
        baseline_offset: i32,
    ) -> Result<EncodedPayload> {
        finish(
            "render_text",
            self.rasterize_text(text, point_size, baseline_offset),
        )
    }

    /// Same as [`render_text`](Self::render_text) for raw bytes; invalid
    /// UTF-8 sequences become U+FFFD.
    pub fn render_text_bytes(
        &self,
        text: &[u8],
        point_size: i32,
        baseline_offset: i32,
    ) -> Result<EncodedPayload> {
        self.render_text(&String::from_utf8_lossy(text), point_size, baseline_offset)
    }

    pub fn render_script(&self, source: &str) -> Result<EncodedPayload> {
        finish("render_script", self.rasterize_script(source))
    }
}

fn finish(entry: &str, raster: Result<Framebuffer>) -> Result<EncodedPayload> {
    match raster {
        Ok(framebuffer) => {
            debug!("{}: {} pixel(s) on", entry, framebuffer.count_on());
            Ok(encoder::encode(framebuffer))
        }
        Err(err) => {
            warn!("{} failed: {} ({})", entry, err, err.kind());
            Err(err)
        }
    }
}

/// Tagged result handed to hosts.
///
/// ```json
/// {"status":"ok","payload":"AAA="}
/// {"status":"error","kind":"FontUnavailable","message":"font unavailable: ..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Ok { payload: EncodedPayload },
    Error { kind: ErrorKind, message: String },
}

impl Response {
    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok { .. })
    }

    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            // Only string and unit fields; serialization cannot fail.
            Err(e) => format!(
                r#"{{"status":"error","kind":"EncodingError","message":{:?}}}"#,
                e.to_string()
            ),
        }
    }
}

impl From<Result<EncodedPayload>> for Response {
    fn from(result: Result<EncodedPayload>) -> Self {
        match result {
            Ok(payload) => Response::Ok { payload },
            Err(err) => Response::from(err),
        }
    }
}

impl From<RasterError> for Response {
    fn from(err: RasterError) -> Self {
        Response::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
