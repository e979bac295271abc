//! GitHub quota provider
//!
//! Implements the QuotaProvider trait for the GitHub REST API by reading
//! `GET /rate_limit`. That endpoint does not count against any pool, so
//! checking never consumes the quota being checked.
//!
//! # Response shape
//!
//! ```text
//! {
//!   "resources": {
//!     "core":   { "limit": 5000, "remaining": 4999, "reset": 1700000000, "used": 1 },
//!     "search": { "limit": 30,   "remaining": 18,   "reset": 1700000000, "used": 12 },
//!     ...
//!   },
//!   "rate": { ... }
//! }
//! ```
//!
//! Only `resources` is read. The deprecated top-level `rate` object
//! duplicates `resources.core`.
//!
//! # Example
//!
//! ```ignore
//! use ghgate_core::services::quota::{GitHubQuotaProvider, QuotaProvider};
//! use ghgate_core::GateConfig;
//!
//! let provider = GitHubQuotaProvider::new(&GateConfig::default())?;
//! let snapshot = provider.fetch_snapshot("ghp_...").await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;

use super::provider::{QuotaError, QuotaProvider};
use super::types::QuotaSnapshot;
use crate::config::GateConfig;

// ============================================================================
// Constants
// ============================================================================

/// Path of the rate-limit status resource, relative to the API base URL
const RATE_LIMIT_PATH: &str = "/rate_limit";

/// Media type GitHub recommends for REST v3 requests
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Maximum number of body bytes kept in error messages and debug logs
const BODY_PREVIEW_LEN: usize = 200;

// ============================================================================
// API Response Types
// ============================================================================

/// Response from GitHub's rate_limit API
#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    /// Per-pool status, keyed by pool name
    resources: QuotaSnapshot,
}

// ============================================================================
// GitHubQuotaProvider
// ============================================================================

/// Quota provider backed by `GET {api_url}/rate_limit`
pub struct GitHubQuotaProvider {
    /// HTTP client for API requests
    client: Client,

    /// Full rate-limit URL
    rate_limit_url: String,

    /// User-Agent header value
    user_agent: String,
}

impl GitHubQuotaProvider {
    /// Create a provider from a validated config
    pub fn new(config: &GateConfig) -> crate::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            rate_limit_url: format!("{}{}", config.api_url, RATE_LIMIT_PATH),
            user_agent: config.user_agent.clone(),
        })
    }

    /// URL this provider requests
    pub fn rate_limit_url(&self) -> &str {
        &self.rate_limit_url
    }

    /// Call the rate_limit API and return the raw body
    async fn call_rate_limit_api(&self, token: &str) -> Result<String, QuotaError> {
        log::info!("[quota:github] Fetching rate limit from {}", self.rate_limit_url);

        let response = self
            .client
            .get(&self.rate_limit_url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await?;

        let status = response.status();
        log::debug!("[quota:github] API response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            log::error!(
                "[quota:github] API error: HTTP {} - {}",
                status,
                preview(&error_body)
            );
            return Err(QuotaError::Transport(format!(
                "HTTP {}: {}",
                status,
                preview(&error_body)
            )));
        }

        let body = response.text().await?;
        log::debug!("[quota:github] API response body: {}", preview(&body));
        Ok(body)
    }
}

/// Parse a rate_limit response body into a snapshot
pub fn parse_rate_limit_response(body: &str) -> Result<QuotaSnapshot, QuotaError> {
    let response: RateLimitResponse = serde_json::from_str(body).map_err(|e| {
        log::error!("[quota:github] Failed to parse API response: {}", e);
        QuotaError::Parse(format!("Invalid rate limit response: {}", e))
    })?;

    Ok(response.resources)
}

/// First `BODY_PREVIEW_LEN` bytes of `body`, cut on a char boundary
fn preview(body: &str) -> &str {
    if body.len() <= BODY_PREVIEW_LEN {
        return body;
    }
    let mut end = BODY_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[async_trait]
impl QuotaProvider for GitHubQuotaProvider {
    fn provider_id(&self) -> &'static str {
        "github"
    }

    async fn fetch_snapshot(&self, token: &str) -> Result<QuotaSnapshot, QuotaError> {
        let body = self.call_rate_limit_api(token).await?;
        let snapshot = parse_rate_limit_response(&body)?;

        log::info!(
            "[quota:github] Fetched rate limit for pools: {}",
            snapshot.pool_names().collect::<Vec<_>>().join(", ")
        );
        Ok(snapshot)
    }
}

// ============================================================================
// Tests
// ============================================================================
