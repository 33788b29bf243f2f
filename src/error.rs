//! Error handling for the matching engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text index error: {0}")]
    TextIndex(String),

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("Matching score {score:.3} below threshold {threshold:.3}")]
    BelowThreshold { score: f64, threshold: f64 },

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, MatchingError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for MatchingError {
    fn from(err: anyhow::Error) -> Self {
        MatchingError::Processing(err.to_string())
    }
}

impl From<askama::Error> for MatchingError {
    fn from(err: askama::Error) -> Self {
        MatchingError::Rendering(err.to_string())
    }
}
