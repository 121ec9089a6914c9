//! TrueType/OpenType font driver backed by `ttf-parser`.

use super::font_driver::{FontDriver, FontSpec, GlyphId};
use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::fs;
use ttf_parser::{Face, OutlineBuilder};

/// Reads font files from disk and answers glyph queries from their tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TtfFontDriver;

/// A parsed font face.
///
/// The file bytes are leaked to get a `'static` face, so a loaded font stays
/// resident for the rest of the process. `FontManager` loads it once.
pub struct TtfFont {
    face: Face<'static>,
}

impl TtfFont {
    /// Parses `data` as the font face at `face_index`.
    pub fn from_bytes(data: Vec<u8>, face_index: u32) -> Result<Self> {
        Face::parse(&data, face_index)
            .map_err(|e| anyhow!("Failed to parse font face {}: {}", face_index, e))?;
        let data: &'static [u8] = Box::leak(data.into_boxed_slice());
        let face = Face::parse(data, face_index)
            .map_err(|e| anyhow!("Failed to parse font face {}: {}", face_index, e))?;
        Ok(Self { face })
    }
}

impl TtfFontDriver {
    pub fn new() -> Self {
        Self
    }
}

impl FontDriver for TtfFontDriver {
    type Font = TtfFont;

    fn load_font(&self, spec: &FontSpec) -> Result<Self::Font> {
        let data = fs::read(&spec.path)
            .with_context(|| format!("Failed to read font file '{}'", spec.path.display()))?;
        let font = TtfFont::from_bytes(data, spec.face_index)
            .with_context(|| format!("Invalid font file '{}'", spec.path.display()))?;
        info!(
            "TtfFontDriver: Loaded '{}' ({} glyphs, {} units/em)",
            spec.path.display(),
            font.face.number_of_glyphs(),
            font.face.units_per_em()
        );
        Ok(font)
    }

    fn find_glyph(&self, font: &Self::Font, ch: char) -> Option<GlyphId> {
        // Glyph 0 is .notdef, the font's "missing" box.
        font.face.glyph_index(ch).filter(|glyph| glyph.0 != 0)
    }

    fn units_per_em(&self, font: &Self::Font) -> u16 {
        font.face.units_per_em()
    }

    fn advance(&self, font: &Self::Font, glyph: GlyphId) -> u16 {
        font.face.glyph_hor_advance(glyph).unwrap_or(0)
    }

    fn kerning(&self, font: &Self::Font, left: GlyphId, right: GlyphId) -> i16 {
        let Some(kern) = font.face.tables().kern else {
            return 0;
        };
        for subtable in kern.subtables {
            if !subtable.horizontal || subtable.variable {
                continue;
            }
            if let Some(value) = subtable.glyphs_kerning(left, right) {
                return value;
            }
        }
        0
    }

    fn outline_glyph(
        &self,
        font: &Self::Font,
        glyph: GlyphId,
        builder: &mut dyn OutlineBuilder,
    ) -> bool {
        let found = font.face.outline_glyph(glyph, builder).is_some();
        if !found {
            debug!("TtfFontDriver: Glyph {:?} has no outline", glyph);
        }
        found
    }
}
