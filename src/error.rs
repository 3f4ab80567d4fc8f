//! Error types
//!
//! The per-tick path never fails. Errors only surface at the edges: loading
//! settings and turning raw landmark buffers into frames.

use std::fmt;

/// Errors that can occur while loading or validating settings.
#[derive(Debug)]
pub enum SettingsError {
    /// Failed to read or write the settings file.
    Io(std::io::Error),
    /// Settings JSON could not be parsed.
    Parse(serde_json::Error),
    /// Settings parsed but hold an unusable value.
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Failed to access settings file: {}", e),
            SettingsError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "Invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Errors that can occur while building a landmark frame from raw data.
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkError {
    /// Fewer landmarks than a full hand.
    TooShort { got: usize },
    /// Flat buffer length is not a multiple of the point stride.
    BadStride { len: usize, stride: usize },
    /// A coordinate is NaN or infinite.
    NonFinite { index: usize },
}

impl fmt::Display for LandmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandmarkError::TooShort { got } => {
                write!(f, "Hand has {} landmarks, expected {}", got, crate::gesture::LANDMARK_COUNT)
            }
            LandmarkError::BadStride { len, stride } => {
                write!(f, "Buffer of {} floats is not a multiple of stride {}", len, stride)
            }
            LandmarkError::NonFinite { index } => {
                write!(f, "Landmark {} has a non-finite coordinate", index)
            }
        }
    }
}

impl std::error::Error for LandmarkError {}
