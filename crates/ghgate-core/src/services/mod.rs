//! Services module

pub mod quota;

pub use quota::{
    run_preflight, validate_token, Decision, DecisionOutcome, GitHubQuotaProvider, Pool,
    PoolStatus, QuotaError, QuotaGate, QuotaProvider, QuotaSnapshot,
};
