//! Rate-limit preflight module
//!
//! Decides whether there is enough GitHub API quota left to make a call,
//! without making it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ run_preflight()                                         │
//! │   1. validate_token()      (no network on failure)      │
//! │   2. QuotaGate::classify() -> search | core             │
//! │   3. QuotaProvider::fetch_snapshot()                    │
//! │   4. QuotaGate::decide()   -> Decision                  │
//! └─────────────────────────────────────────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │ trait QuotaProvider                                     │
//! │   - fetch_snapshot(token) -> QuotaSnapshot              │
//! └─────────────────────────────────────────────────────────┘
//!          │
//!          ▼
//!     ┌────────┐
//!     │ GitHub │  GET /rate_limit
//!     └────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ghgate_core::services::quota::{run_preflight, GitHubQuotaProvider, QuotaGate};
//! use ghgate_core::GateConfig;
//!
//! let config = GateConfig::default();
//! let gate = QuotaGate::from_config(&config);
//! let provider = GitHubQuotaProvider::new(&config)?;
//!
//! let decision = run_preflight(&gate, &provider, &token, "/search/issues", &config.token_prefix).await?;
//! if !decision.proceed {
//!     println!("{}", decision.message);
//! }
//! ```

pub mod credential;
pub mod gate;
pub mod github;
pub mod preflight;
pub mod provider;
pub mod types;

// Re-export main types
pub use types::{format_reset, Decision, DecisionOutcome, Pool, PoolStatus, QuotaSnapshot};

// Re-export provider trait and error
pub use provider::{QuotaError, QuotaProvider};

// Re-export providers
pub use github::{parse_rate_limit_response, GitHubQuotaProvider};

pub use credential::validate_token;
pub use gate::{percent_remaining, QuotaGate};
pub use preflight::run_preflight;
