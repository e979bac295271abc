//! Runtime configuration for a preflight check
//!
//! There is no config file: the CLI fills a [`GateConfig`] from its
//! arguments (which fall back to environment variables) and hands it to
//! the core.

use std::time::Duration;

use crate::error::{Error, Result};

/// Public GitHub REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Prefix carried by GitHub classic personal access tokens
pub const DEFAULT_TOKEN_PREFIX: &str = "ghp_";

/// Minimum remaining percentage required to proceed
pub const DEFAULT_THRESHOLD_PERCENT: u8 = 10;

/// HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Strip the scheme from an API URL
///
/// `https://api.github.com` -> `api.github.com`,
/// `https://ghe.example.com/api/v3` -> `ghe.example.com/api/v3`.
/// The gate builds its host-qualified search prefixes from this.
pub fn host_of(api_url: &str) -> &str {
    api_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(api_url)
}

/// Settings shared by the gate and the GitHub provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// API base URL, without trailing slash (e.g. `https://api.github.com`)
    pub api_url: String,
    /// Literal prefix every accepted token must start with
    pub token_prefix: String,
    /// Proceed when the remaining percentage is at or above this value
    pub threshold_percent: u8,
    /// Timeout applied to the rate-limit fetch
    pub timeout: Duration,
    /// User-Agent header sent to GitHub (required by the API)
    pub user_agent: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_prefix: DEFAULT_TOKEN_PREFIX.to_string(),
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("ghgate/{}", crate::VERSION),
        }
    }
}

impl GateConfig {
    /// Set the API base URL; a trailing slash is dropped
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the required token prefix
    pub fn with_token_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.token_prefix = prefix.into();
        self
    }

    /// Set the proceed threshold
    pub fn with_threshold(mut self, percent: u8) -> Self {
        self.threshold_percent = percent;
        self
    }

    /// Set the fetch timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Host part of `api_url`; see [`host_of`]
    pub fn api_host(&self) -> &str {
        host_of(&self.api_url)
    }

    /// Check the configuration before anything is built from it
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("https://") || self.api_url.starts_with("http://")) {
            return Err(Error::config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.api_host().is_empty() {
            return Err(Error::config("API URL has no host"));
        }
        if self.threshold_percent > 100 {
            return Err(Error::config(format!(
                "threshold must be between 0 and 100, got {}",
                self.threshold_percent
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero"));
        }
        Ok(())
    }
}
