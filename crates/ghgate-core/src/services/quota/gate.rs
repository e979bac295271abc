//! Pool classification and go/no-go decision
//!
//! [`QuotaGate`] is the whole decision: map an endpoint onto a pool, read
//! that pool from a snapshot, and compare the remaining percentage against
//! the threshold. It performs no I/O.
//!
//! # Classification
//!
//! An endpoint is charged to the search pool when it starts with one of
//! four spellings of the search resource:
//!
//! ```text
//! search
//! /search
//! api.github.com/search
//! https://api.github.com/search
//! ```
//!
//! Matching is a literal, case-sensitive prefix comparison. Anything that
//! merely begins with those characters counts, so `/search-foo` and
//! `searching-tips` are classified as search too.

use super::provider::QuotaError;
use super::types::{format_reset, Decision, Pool, PoolStatus, QuotaSnapshot};
use crate::config::{host_of, GateConfig, DEFAULT_THRESHOLD_PERCENT};

/// Path segment GitHub serves the search API under
const SEARCH_RESOURCE: &str = "search";

/// Classifies endpoints and decides whether there is enough quota left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaGate {
    /// Accepted spellings of the search resource; fixed at construction
    search_prefixes: [String; 4],
    /// Proceed when percent remaining is at or above this
    threshold_percent: u8,
}

impl Default for QuotaGate {
    fn default() -> Self {
        Self::from_config(&GateConfig::default())
    }
}

impl QuotaGate {
    /// Build a gate for the API served at `api_url` (e.g. `https://api.github.com`)
    pub fn new(api_url: &str) -> Self {
        let api_url = api_url.trim_end_matches('/');
        let host = host_of(api_url);

        Self {
            search_prefixes: [
                SEARCH_RESOURCE.to_string(),
                format!("/{}", SEARCH_RESOURCE),
                format!("{}/{}", host, SEARCH_RESOURCE),
                format!("{}/{}", api_url, SEARCH_RESOURCE),
            ],
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }

    /// Build a gate from the API URL and threshold of a config
    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(&config.api_url).with_threshold(config.threshold_percent)
    }

    /// Set the proceed threshold (percent, 0-100)
    pub fn with_threshold(mut self, percent: u8) -> Self {
        self.threshold_percent = percent.min(100);
        self
    }

    pub fn threshold_percent(&self) -> u8 {
        self.threshold_percent
    }

    pub fn search_prefixes(&self) -> &[String] {
        &self.search_prefixes
    }

    /// Decide which pool a request to `endpoint` is charged against
    pub fn classify(&self, endpoint: &str) -> Pool {
        if self
            .search_prefixes
            .iter()
            .any(|prefix| endpoint.starts_with(prefix.as_str()))
        {
            Pool::Search
        } else {
            Pool::Core
        }
    }

    /// Decide whether there is enough of `pool` left in `snapshot`
    ///
    /// # Errors
    ///
    /// - `MissingPool` if the snapshot has no entry for `pool`
    /// - `InvalidSnapshot` if the entry is malformed or cannot produce a percentage
    pub fn decide(&self, pool: Pool, snapshot: &QuotaSnapshot) -> Result<Decision, QuotaError> {
        let status = snapshot.status(pool)?;
        let percent = percent_remaining(&status)?;

        log::debug!(
            "[quota:gate] {} pool: {}/{} remaining ({}%), threshold {}%",
            pool,
            status.remaining,
            status.limit,
            percent,
            self.threshold_percent
        );

        if percent < self.threshold_percent {
            let reset_at = status.reset_at().ok_or_else(|| {
                QuotaError::InvalidSnapshot(format!(
                    "{} pool has an out-of-range reset timestamp {}",
                    pool, status.reset
                ))
            })?;
            let message = format!(
                "The {} rate limit is below {}% ({}% remaining). Try after {}",
                pool,
                self.threshold_percent,
                percent,
                format_reset(reset_at)
            );
            Ok(Decision {
                proceed: false,
                percent_remaining: percent,
                pool,
                reset_at: Some(reset_at),
                message,
            })
        } else {
            let message = format!(
                "The {} rate limit is at or above {}% ({}% remaining). Good to go!",
                pool, self.threshold_percent, percent
            );
            Ok(Decision {
                proceed: true,
                percent_remaining: percent,
                pool,
                reset_at: None,
                message,
            })
        }
    }

    /// Classify `endpoint` and decide against its pool
    pub fn evaluate(&self, endpoint: &str, snapshot: &QuotaSnapshot) -> Result<Decision, QuotaError> {
        self.decide(self.classify(endpoint), snapshot)
    }
}

/// `floor(100 * remaining / limit)`
///
/// Truncates: 99 of 1000 is 9, not 10.
pub fn percent_remaining(status: &PoolStatus) -> Result<u8, QuotaError> {
    if status.limit == 0 {
        return Err(QuotaError::InvalidSnapshot("limit is zero".to_string()));
    }
    if status.remaining > status.limit {
        return Err(QuotaError::InvalidSnapshot(format!(
            "remaining ({}) exceeds limit ({})",
            status.remaining, status.limit
        )));
    }

    let percent = u128::from(status.remaining) * 100 / u128::from(status.limit);
    // remaining <= limit keeps this within 0..=100
    Ok(percent as u8)
}
