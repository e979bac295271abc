//! Unified error handling for ghgate-core

use thiserror::Error;

use crate::services::quota::QuotaError;

/// Core error type for ghgate-core
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Quota(#[from] QuotaError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for ghgate-core
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
