//! Error types for the math-markup-preview library.
//!
//! Highlighting itself never fails; these errors come from the settings
//! layer and from the I/O done by the binary.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("This is not a valid JSON: {0}")]
    InvalidParameters(String),

    #[error("Invalid settings file: {0}")]
    Config(String),

    #[error("Unknown save mode: {0} (expected xml, image or base64)")]
    UnknownSaveMode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidParameters(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
