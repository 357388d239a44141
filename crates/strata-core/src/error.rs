//! Error types for strata-core.

use thiserror::Error;

/// Error type for strata-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid speaker layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid speaker {index}: {reason}")]
    InvalidSpeaker { index: usize, reason: String },

    #[cfg(feature = "layout-files")]
    #[error("Failed to parse setup file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
