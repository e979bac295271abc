//! Quota provider trait and error types
//!
//! Defines the interface the rate-limit fetch must implement, and the
//! failures a preflight check can end with.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{Pool, QuotaSnapshot};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can end a preflight check
///
/// A blocked decision is not an error; see [`super::Decision`].
#[derive(Error, Debug)]
pub enum QuotaError {
    /// Token does not carry the prefix the provider requires
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Rate-limit request failed (HTTP error status or network fault)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Snapshot has no entry for the pool the endpoint maps to
    #[error("Rate limit response has no '{0}' pool")]
    MissingPool(Pool),

    /// Pool entry cannot produce a percentage (zero limit, remaining above limit)
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Failed to parse the provider response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for QuotaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QuotaError::Transport(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            QuotaError::Transport(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            QuotaError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            QuotaError::Transport(format!("HTTP {}", status))
        } else {
            QuotaError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for QuotaError {
    fn from(err: serde_json::Error) -> Self {
        QuotaError::Parse(err.to_string())
    }
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Source of rate-limit snapshots
///
/// The preflight check calls [`QuotaProvider::fetch_snapshot`] at most once
/// per run and never retries.
///
/// # Example Implementation
///
/// ```ignore
/// use async_trait::async_trait;
/// use ghgate_core::services::quota::{QuotaError, QuotaProvider, QuotaSnapshot};
///
/// struct FixedProvider(QuotaSnapshot);
///
/// #[async_trait]
/// impl QuotaProvider for FixedProvider {
///     fn provider_id(&self) -> &'static str {
///         "fixed"
///     }
///
///     async fn fetch_snapshot(&self, _token: &str) -> Result<QuotaSnapshot, QuotaError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait QuotaProvider: Send + Sync {
    /// Short lowercase identifier, used in log lines
    fn provider_id(&self) -> &'static str;

    /// Fetch the current rate-limit status for every pool
    ///
    /// # Errors
    ///
    /// Returns `QuotaError` if:
    /// - The request fails or returns a non-success status (`Transport`)
    /// - The response body cannot be decoded (`Parse`)
    async fn fetch_snapshot(&self, token: &str) -> Result<QuotaSnapshot, QuotaError>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_error_from_serde() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let quota_err: QuotaError = json_err.into();
        assert!(matches!(quota_err, QuotaError::Parse(_)));
    }

    #[test]
    fn test_quota_error_display() {
        assert_eq!(
            QuotaError::InvalidCredential("token must start with 'ghp_'".to_string()).to_string(),
            "Invalid credential: token must start with 'ghp_'"
        );
        assert_eq!(
            QuotaError::MissingPool(Pool::Search).to_string(),
            "Rate limit response has no 'search' pool"
        );
        assert_eq!(
            QuotaError::Transport("HTTP 401 Unauthorized".to_string()).to_string(),
            "Transport error: HTTP 401 Unauthorized"
        );
    }
}
