//! Quota tracking types
//!
//! Types describing GitHub rate-limit pools and the go/no-go decision.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::provider::QuotaError;

// ============================================================================
// Pool
// ============================================================================

/// Rate-limit pool a request is charged against
///
/// GitHub tracks the search API separately from every other REST call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    /// `/search/*` endpoints (small, per-minute budget)
    Search,
    /// Everything else
    Core,
}

impl Pool {
    /// Key of this pool in the `resources` object of the rate-limit response
    pub fn as_str(&self) -> &'static str {
        match self {
            Pool::Search => "search",
            Pool::Core => "core",
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Pool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(Pool::Search),
            "core" => Ok(Pool::Core),
            _ => Err(format!("Unknown pool: {}", s)),
        }
    }
}

// ============================================================================
// Snapshot Types
// ============================================================================

/// Limit, remaining calls and reset time for one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatus {
    /// Calls allowed per window
    pub limit: u64,
    /// Calls left in the current window
    pub remaining: u64,
    /// Unix timestamp (seconds) at which the window resets
    pub reset: i64,
}

impl PoolStatus {
    pub fn new(limit: u64, remaining: u64, reset: i64) -> Self {
        Self {
            limit,
            remaining,
            reset,
        }
    }

    /// Reset time as a UTC datetime, `None` if the timestamp is out of range
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.reset, 0)
    }
}

/// Point-in-time read of every pool returned by the provider
///
/// Serializes as the `resources` object of GitHub's response. Entries are
/// kept as raw JSON and only the pool asked for is decoded, so an odd
/// entry for a pool nobody checks cannot fail the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotaSnapshot {
    resources: BTreeMap<String, serde_json::Value>,
}

impl QuotaSnapshot {
    /// Add or replace a pool
    pub fn with_pool(mut self, name: impl Into<String>, status: PoolStatus) -> Self {
        self.resources.insert(name.into(), serde_json::json!(status));
        self
    }

    /// Decode the status of `pool`
    ///
    /// # Errors
    ///
    /// - `MissingPool` if the provider did not report the pool
    /// - `InvalidSnapshot` if the entry is not a `{limit, remaining, reset}` record
    pub fn status(&self, pool: Pool) -> Result<PoolStatus, QuotaError> {
        let raw = self
            .resources
            .get(pool.as_str())
            .ok_or(QuotaError::MissingPool(pool))?;

        PoolStatus::deserialize(raw).map_err(|e| {
            QuotaError::InvalidSnapshot(format!("{} pool is malformed: {}", pool, e))
        })
    }

    /// Every pool name in the snapshot, including ones the gate never reads
    pub fn pool_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}

// ============================================================================
// Decision
// ============================================================================

/// Outcome of a preflight check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Whether the caller should go ahead with its request
    pub proceed: bool,
    /// `floor(100 * remaining / limit)`
    pub percent_remaining: u8,
    /// Pool the endpoint was charged against
    pub pool: Pool,
    /// When the pool refills; only set on a blocked decision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<DateTime<Utc>>,
    /// Human-readable explanation
    pub message: String,
}

impl Decision {
    pub fn outcome(&self) -> DecisionOutcome {
        if self.proceed {
            DecisionOutcome::Proceed
        } else {
            DecisionOutcome::Blocked
        }
    }
}

/// Go / no-go label used in machine-readable output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Proceed,
    Blocked,
}

impl std::fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionOutcome::Proceed => write!(f, "proceed"),
            DecisionOutcome::Blocked => write!(f, "blocked"),
        }
    }
}

/// Format a reset time for display in the local timezone
pub fn format_reset(reset_at: DateTime<Utc>) -> String {
    reset_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_display() {
        assert_eq!(Pool::Search.to_string(), "search");
        assert_eq!(Pool::Core.to_string(), "core");
    }

    #[test]
    fn test_pool_from_str() {
        assert_eq!("search".parse::<Pool>().unwrap(), Pool::Search);
        assert_eq!("core".parse::<Pool>().unwrap(), Pool::Core);
        assert!("graphql".parse::<Pool>().is_err());
        assert!("Core".parse::<Pool>().is_err());
    }

    #[test]
    fn test_snapshot_deserializes_resource_map() {
        let json = r#"{
            "core": {"limit": 5000, "remaining": 4999, "reset": 1700000000, "used": 1, "resource": "core"},
            "graphql": {"limit": 5000, "remaining": 5000, "reset": 1700000000}
        }"#;
        let snapshot: QuotaSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(
            snapshot.status(Pool::Core).unwrap(),
            PoolStatus::new(5000, 4999, 1_700_000_000)
        );
        assert!(matches!(
            snapshot.status(Pool::Search),
            Err(QuotaError::MissingPool(Pool::Search))
        ));
        assert_eq!(snapshot.pool_names().collect::<Vec<_>>(), vec!["core", "graphql"]);
    }

    #[test]
    fn test_unread_pool_may_be_malformed() {
        let json = r#"{
            "core": {"limit": 5000, "remaining": 600, "reset": 1700000000},
            "source_import": {"limit": 100, "remaining": null, "reset": 1700000000},
            "graphql": "unavailable"
        }"#;
        let snapshot: QuotaSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(
            snapshot.status(Pool::Core).unwrap(),
            PoolStatus::new(5000, 600, 1_700_000_000)
        );
        assert_eq!(snapshot.pool_names().count(), 3);
    }

    #[test]
    fn test_malformed_target_pool_is_invalid() {
        let json = r#"{"search": {"limit": 30, "remaining": null, "reset": 1700000000}}"#;
        let snapshot: QuotaSnapshot = serde_json::from_str(json).unwrap();

        let err = snapshot.status(Pool::Search).unwrap_err();
        assert!(matches!(err, QuotaError::InvalidSnapshot(_)));
        assert!(err.to_string().contains("search pool is malformed"));
    }

    #[test]
    fn test_with_pool_round_trips_status() {
        let snapshot = QuotaSnapshot::default().with_pool("core", PoolStatus::new(60, 59, 0));
        assert_eq!(snapshot.status(Pool::Core).unwrap(), PoolStatus::new(60, 59, 0));
    }

    #[test]
    fn test_pool_status_reset_at() {
        let status = PoolStatus::new(30, 2, 1_700_000_000);
        let reset = status.reset_at().unwrap();
        assert_eq!(reset.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_decision_serializes_without_reset_when_proceeding() {
        let decision = Decision {
            proceed: true,
            percent_remaining: 12,
            pool: Pool::Core,
            reset_at: None,
            message: "ok".to_string(),
        };
        let value = serde_json::to_value(&decision).unwrap();
        assert_eq!(value["pool"], "core");
        assert_eq!(value["percent_remaining"], 12);
        assert!(value.get("reset_at").is_none());
        assert_eq!(decision.outcome(), DecisionOutcome::Proceed);
    }

    #[test]
    fn test_format_reset_matches_local_time() {
        let reset = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let expected = reset.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string();
        assert_eq!(format_reset(reset), expected);
    }
}
