// src/color.rs

//! Defines the two pixel values a monochrome raster can hold.

use serde::{Deserialize, Serialize};

/// A 1-bit pixel value.
///
/// `Off` is the background (bit 0, dark on an SSD1306 panel), `On` is the
/// foreground (bit 1, lit). Every drawing primitive takes one of these
/// explicitly; there is no "current color" state anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryColor {
    #[default]
    Off,
    On,
}

impl BinaryColor {
    /// Background color used when a canvas is created or cleared.
    pub const BACKGROUND: BinaryColor = BinaryColor::Off;
    /// Foreground color used for text and script drawing.
    pub const FOREGROUND: BinaryColor = BinaryColor::On;

    /// Returns the bit this color occupies in the packed raster.
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            BinaryColor::Off => 0,
            BinaryColor::On => 1,
        }
    }

    /// Returns the opposite color.
    pub const fn invert(self) -> Self {
        match self {
            BinaryColor::Off => BinaryColor::On,
            BinaryColor::On => BinaryColor::Off,
        }
    }

    pub const fn is_on(self) -> bool {
        matches!(self, BinaryColor::On)
    }
}

impl From<bool> for BinaryColor {
    fn from(on: bool) -> Self {
        if on {
            BinaryColor::On
        } else {
            BinaryColor::Off
        }
    }
}

impl From<BinaryColor> for bool {
    fn from(color: BinaryColor) -> Self {
        color.is_on()
    }
}
