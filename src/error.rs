//! Error types

use thiserror::Error;

/// A record could not be turned into canonical bytes.
///
/// Aborts the whole root computation; no partial root is ever returned.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode encoding failed: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("record not encodable: {0}")]
    Unsupported(String),
}

/// Errors surfaced by configuration, logging and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
