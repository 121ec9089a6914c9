//! Shared font handle with a once-only load.
//!
//! The `FontManager` owns the single process-wide font handle. The first
//! request loads the asset through a `FontDriver`; concurrent first requests
//! block on the same initialization instead of parsing the file twice, and
//! every later request reads the same handle.

use super::font_driver::{FontDriver, FontSpec, GlyphId};
use super::outline::GlyphBuilder;
use super::{FontProvider, GlyphSource};
use crate::config::{FontConfig, FontFailurePolicy};
use crate::error::RasterError;
use crate::rasterizer::curves::Segment;
use log::*;
use once_cell::sync::OnceCell;
use std::sync::Arc;

pub struct FontManager<D: FontDriver> {
    driver: D,
    spec: FontSpec,
    policy: FontFailurePolicy,

    /// Set once by the first successful load, read-only afterwards.
    font: OnceCell<Arc<D::Font>>,

    /// Set by a failed load under `FontFailurePolicy::Fatal`.
    failure: OnceCell<String>,
}

impl<D: FontDriver> FontManager<D> {
    pub fn new(driver: D, spec: FontSpec, policy: FontFailurePolicy) -> Self {
        Self {
            driver,
            spec,
            policy,
            font: OnceCell::new(),
            failure: OnceCell::new(),
        }
    }

    pub fn from_config(driver: D, config: &FontConfig) -> Self {
        Self::new(driver, FontSpec::from(config), config.on_load_failure)
    }

    /// Get the loaded font, loading it on first use.
    pub fn font(&self) -> Result<Arc<D::Font>, RasterError> {
        if let Some(reason) = self.failure.get() {
            return Err(RasterError::FontUnavailable(reason.clone()));
        }

        self.font
            .get_or_try_init(|| {
                // A thread that waited on a failing initializer must not load again.
                if let Some(reason) = self.failure.get() {
                    return Err(RasterError::FontUnavailable(reason.clone()));
                }

                info!("FontManager: Loading font '{}'", self.spec.path.display());
                match self.driver.load_font(&self.spec) {
                    Ok(font) => Ok(Arc::new(font)),
                    Err(e) => {
                        let reason = format!("{:#}", e);
                        warn!("FontManager: Font load failed: {}", reason);
                        if self.policy == FontFailurePolicy::Fatal {
                            let _ = self.failure.set(reason.clone());
                        }
                        Err(RasterError::FontUnavailable(reason))
                    }
                }
            })
            .cloned()
    }

    /// Scale the shared font to `point_size` pixels per em.
    pub fn scaled(&self, point_size: i32) -> Result<ScaledFont<D>, RasterError> {
        if point_size <= 0 {
            return Err(RasterError::InvalidArgument(format!(
                "point size must be positive, got {}",
                point_size
            )));
        }
        let font = self.font()?;
        let units_per_em = self.driver.units_per_em(&font).max(1);
        Ok(ScaledFont {
            driver: self.driver.clone(),
            font,
            scale: point_size as f32 / units_per_em as f32,
        })
    }

    /// True once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.font.get().is_some()
    }

    /// Forget the loaded font and any cached failure so the next request loads again.
    pub fn reset(&mut self) {
        let had_font = self.font.take().is_some();
        let had_failure = self.failure.take().is_some();
        if had_font || had_failure {
            info!("FontManager: Reset, next request reloads '{}'", self.spec.path.display());
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: FontDriver> FontProvider for FontManager<D> {
    fn sized(&self, point_size: i32) -> Result<Box<dyn GlyphSource>, RasterError> {
        Ok(Box::new(self.scaled(point_size)?))
    }
}

/// The shared font at one pixel size.
pub struct ScaledFont<D: FontDriver> {
    driver: D,
    font: Arc<D::Font>,
    scale: f32,
}

impl<D: FontDriver> ScaledFont<D> {
    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        let glyph = self.driver.find_glyph(&self.font, ch);
        if glyph.is_none() {
            debug!("ScaledFont: No glyph for '{}' (U+{:X})", ch, ch as u32);
        }
        glyph
    }
}

impl<D: FontDriver> GlyphSource for ScaledFont<D> {
    fn advance(&self, ch: char) -> Option<f32> {
        let glyph = self.glyph_id(ch)?;
        Some(self.driver.advance(&self.font, glyph) as f32 * self.scale)
    }

    fn outline(&self, ch: char) -> Option<Vec<Segment>> {
        let glyph = self.glyph_id(ch)?;
        let mut builder = GlyphBuilder::new(self.scale);
        if !self.driver.outline_glyph(&self.font, glyph, &mut builder) {
            return None;
        }
        let segments = builder.finish();
        trace!(
            "ScaledFont: '{}' (U+{:X}) -> {} segments",
            ch,
            ch as u32,
            segments.len()
        );
        Some(segments)
    }

    fn kerning(&self, left: char, right: char) -> f32 {
        match (
            self.driver.find_glyph(&self.font, left),
            self.driver.find_glyph(&self.font, right),
        ) {
            (Some(l), Some(r)) => self.driver.kerning(&self.font, l, r) as f32 * self.scale,
            _ => 0.0,
        }
    }
}
