//! # ghgate-core
//!
//! Core logic for ghgate - a preflight check against GitHub API rate limits.
//!
//! This crate provides:
//! - Pool classification and go/no-go decisions (`services::quota`)
//! - The GitHub `rate_limit` fetch (`services::quota::github`)
//! - Runtime configuration (`config` module)
//! - Unified error handling (`error` module)

pub mod config;
pub mod error;
pub mod services;

// Re-exports for convenience
pub use config::GateConfig;
pub use error::{Error, Result};

// Re-export commonly used types from services
pub use services::{
    run_preflight, validate_token, Decision, DecisionOutcome, GitHubQuotaProvider, Pool,
    PoolStatus, QuotaError, QuotaGate, QuotaProvider, QuotaSnapshot,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_version_format() {
        let v = VERSION;
        // Should be semver format: x.y.z
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "Version should be in x.y.z format");
    }
}
