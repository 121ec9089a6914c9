// src/error.rs

//! The single error type returned across the library boundary.
//!
//! Geometry edge cases (off-canvas coordinates, negative origins, missing glyph
//! coverage) are never errors. Only invalid inputs, font acquisition and script
//! execution failures surface here.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("invalid raster dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: i64, height: i64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    #[error("script failed: {0}")]
    ScriptExecution(String),

    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl RasterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RasterError::InvalidDimension { .. } => ErrorKind::InvalidDimension,
            RasterError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RasterError::FontUnavailable(_) => ErrorKind::FontUnavailable,
            RasterError::ScriptExecution(_) => ErrorKind::ScriptExecutionError,
            RasterError::Encoding(_) => ErrorKind::EncodingError,
        }
    }
}

/// Stable tag identifying which class of failure occurred.
///
/// The serialized form is the tag string itself, so hosts can match on it
/// without parsing the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidDimension,
    InvalidArgument,
    FontUnavailable,
    ScriptExecutionError,
    EncodingError,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidDimension => "InvalidDimension",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::FontUnavailable => "FontUnavailable",
            ErrorKind::ScriptExecutionError => "ScriptExecutionError",
            ErrorKind::EncodingError => "EncodingError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Result<T, E = RasterError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_stable_tags() {
        let cases = [
            (
                RasterError::InvalidDimension { width: 0, height: 64 },
                "InvalidDimension",
            ),
            (RasterError::InvalidArgument("x".into()), "InvalidArgument"),
            (RasterError::FontUnavailable("x".into()), "FontUnavailable"),
            (RasterError::ScriptExecution("x".into()), "ScriptExecutionError"),
            (RasterError::Encoding("x".into()), "EncodingError"),
        ];
        for (err, tag) in cases {
            assert_eq!(err.kind().as_str(), tag);
            assert_eq!(
                serde_json::to_string(&err.kind()).unwrap(),
                format!("\"{}\"", tag)
            );
        }
    }

    #[test]
    fn messages_carry_details() {
        let err = RasterError::InvalidDimension { width: -1, height: 64 };
        assert!(err.to_string().contains("-1x64"));
    }
}
