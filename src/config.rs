// src/config.rs

//! Defines the configuration structures for the raster service.
//!
//! Every struct deserializes with `#[serde(default)]`, so a configuration file
//! only needs to mention the settings it changes. The defaults reproduce the
//! reference hardware setup: a 128x64 SSD1306 panel and a monochrome-capable
//! emoji font next to the working directory.

use anyhow::{Context, Result};
use log::info;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Process-wide configuration used by the global entry points.
///
/// Holds the defaults; hosts that load a file build their own
/// [`RasterService`](crate::service::RasterService) from it instead.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::default);

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Raster geometry.
    pub display: DisplayConfig,
    /// Font asset used for text rendering.
    pub font: FontConfig,
    /// Limits applied to scripted drawing.
    pub script: ScriptConfig,
}

impl Config {
    /// Loads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        info!("Configuration loaded from '{}'", path.display());
        Ok(config)
    }
}

// --- Display Configuration ---

/// Raster size in pixels. Fixed per process, not per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: 128,
            height: 64,
        }
    }
}

// --- Font Configuration ---

/// What to do after the font asset failed to load once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFailurePolicy {
    /// Remember the failure and report it on every request until reset.
    #[default]
    Fatal,
    /// Try to load the asset again on the next request.
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Path to a TrueType/OpenType file with monochrome outlines.
    /// Color-only emoji fonts (e.g. CBDT bitmaps) have no usable outlines.
    pub path: PathBuf,
    /// Face index inside a font collection; 0 for plain font files.
    pub face_index: u32,
    pub on_load_failure: FontFailurePolicy,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            path: PathBuf::from("./font/segoe-ui-emoji.ttf"),
            face_index: 0,
            on_load_failure: FontFailurePolicy::Fatal,
        }
    }
}

// --- Script Configuration ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Wall-clock budget for one script run in milliseconds. 0 disables it.
    pub timeout_ms: u64,
    /// Maximum interpreter operations per run. 0 disables the limit.
    pub max_operations: u64,
    pub max_call_levels: usize,
    pub max_string_size: usize,
    pub max_array_size: usize,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        ScriptConfig {
            timeout_ms: 1_000,
            max_operations: 10_000_000,
            max_call_levels: 32,
            max_string_size: 4_096,
            max_array_size: 4_096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_panel() {
        let config = Config::default();
        assert_eq!(config.display.width, 128);
        assert_eq!(config.display.height, 64);
        assert_eq!(config.font.on_load_failure, FontFailurePolicy::Fatal);
        assert_eq!(*CONFIG, config);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "font": { "on_load_failure": "retry" }, "script": { "timeout_ms": 5 } }"#)
                .unwrap();
        assert_eq!(config.font.on_load_failure, FontFailurePolicy::Retry);
        assert_eq!(config.font.path, FontConfig::default().path);
        assert_eq!(config.script.timeout_ms, 5);
        assert_eq!(config.script.max_call_levels, 32);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("monoraster-config-{}.json", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            write!(file, r#"{{ "display": {{ "width": 96, "height": 16 }} }}"#).unwrap();
        }
        let config = Config::load(&path).unwrap();
        assert_eq!(config.display, DisplayConfig { width: 96, height: 16 });
        fs::remove_file(&path).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
