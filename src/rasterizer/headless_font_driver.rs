//! Headless mock font driver implementation.
//!
//! Every covered character is a solid box inside a 1000 units/em square, so
//! rendered output is easy to predict in tests and demos without a font file.

use super::font_driver::{FontDriver, FontSpec, GlyphId};
use anyhow::{bail, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use ttf_parser::OutlineBuilder;

pub const HEADLESS_UNITS_PER_EM: u16 = 1000;

/// Box glyph extents in font units: x from 100 to `advance - 100`, y from 0 to 700.
const BOX_INSET: f32 = 100.0;
const BOX_TOP: f32 = 700.0;

#[derive(Debug, Clone)]
pub struct HeadlessFontDriver {
    advance: u16,
    missing: Vec<char>,
    fail_load: bool,
    loads: Arc<AtomicUsize>,
}

impl HeadlessFontDriver {
    pub fn new() -> Self {
        Self {
            advance: HEADLESS_UNITS_PER_EM,
            missing: Vec::new(),
            fail_load: false,
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Advance of every glyph in font units (1000 = one em = the point size in pixels).
    pub fn with_advance(mut self, advance: u16) -> Self {
        self.advance = advance.max(1);
        self
    }

    /// Characters the font has no coverage for.
    pub fn with_missing(mut self, missing: impl IntoIterator<Item = char>) -> Self {
        self.missing.extend(missing);
        self
    }

    /// A driver whose every load attempt fails, as with a missing asset.
    pub fn unavailable() -> Self {
        Self {
            fail_load: true,
            ..Self::new()
        }
    }

    /// Number of `load_font` calls made through this driver or its clones.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl Default for HeadlessFontDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FontDriver for HeadlessFontDriver {
    type Font = ();

    fn load_font(&self, spec: &FontSpec) -> Result<Self::Font> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_load {
            bail!("Failed to read font file '{}'", spec.path.display());
        }
        Ok(())
    }

    fn find_glyph(&self, _font: &Self::Font, ch: char) -> Option<GlyphId> {
        if self.missing.contains(&ch) || ch.is_control() {
            return None;
        }
        // Spaces resolve but carry no outline.
        Some(GlyphId(if ch == ' ' { 0 } else { 1 }))
    }

    fn units_per_em(&self, _font: &Self::Font) -> u16 {
        HEADLESS_UNITS_PER_EM
    }

    fn advance(&self, _font: &Self::Font, _glyph: GlyphId) -> u16 {
        self.advance
    }

    fn outline_glyph(
        &self,
        _font: &Self::Font,
        glyph: GlyphId,
        builder: &mut dyn OutlineBuilder,
    ) -> bool {
        if glyph.0 == 0 {
            return false;
        }
        let right = (self.advance as f32 - BOX_INSET).max(BOX_INSET + 1.0);
        builder.move_to(BOX_INSET, 0.0);
        builder.line_to(right, 0.0);
        builder.line_to(right, BOX_TOP);
        builder.line_to(BOX_INSET, BOX_TOP);
        builder.close();
        true
    }
}
