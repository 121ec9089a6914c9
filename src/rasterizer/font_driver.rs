//! Font loading and glyph lookup primitives.
//!
//! This module defines the `FontDriver` trait, a thin layer over a concrete
//! font backend (a TrueType parser, or an in-memory stub for tests). Caching
//! and scaling live in `FontManager`; a driver only answers questions in font
//! units.

use anyhow::Result;
use std::path::PathBuf;
use ttf_parser::OutlineBuilder;

pub use ttf_parser::GlyphId;

/// Where to find a font face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub path: PathBuf,
    /// Face index inside a font collection.
    pub face_index: u32,
}

impl From<&crate::config::FontConfig> for FontSpec {
    fn from(config: &crate::config::FontConfig) -> Self {
        FontSpec {
            path: config.path.clone(),
            face_index: config.face_index,
        }
    }
}

/// Backend-specific font driver trait.
///
/// Implementors provide:
/// - Font loading from a [`FontSpec`]
/// - Glyph lookup for characters
/// - Horizontal metrics and kerning in font units
/// - Outline extraction into a `ttf_parser::OutlineBuilder`
///
/// The `FontManager` uses this trait to implement the once-only load and the
/// per-request scaling.
pub trait FontDriver: Clone + Send + Sync + 'static {
    /// Loaded, size-independent font handle.
    type Font: Send + Sync + 'static;

    /// Load a font face.
    ///
    /// # Returns
    /// Font handle, or error if the asset is missing or cannot be parsed
    fn load_font(&self, spec: &FontSpec) -> Result<Self::Font>;

    /// Find the glyph for `ch`, or `None` if the font has no coverage for it.
    fn find_glyph(&self, font: &Self::Font, ch: char) -> Option<GlyphId>;

    /// Design units per em, used to scale everything else to pixels.
    fn units_per_em(&self, font: &Self::Font) -> u16;

    /// Horizontal advance of a glyph in font units.
    fn advance(&self, font: &Self::Font, glyph: GlyphId) -> u16;

    /// Kerning adjustment between two glyphs in font units.
    fn kerning(&self, _font: &Self::Font, _left: GlyphId, _right: GlyphId) -> i16 {
        0
    }

    /// Feed the glyph outline to `builder`.
    ///
    /// # Returns
    /// `false` if the glyph has no outline (e.g. a space or a bitmap-only glyph)
    fn outline_glyph(
        &self,
        font: &Self::Font,
        glyph: GlyphId,
        builder: &mut dyn OutlineBuilder,
    ) -> bool;
}
