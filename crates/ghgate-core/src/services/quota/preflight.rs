//! One preflight run: credential check, classify, fetch, decide.

use super::credential::validate_token;
use super::gate::QuotaGate;
use super::provider::{QuotaError, QuotaProvider};
use super::types::Decision;

/// Check whether a request to `endpoint` should go ahead
///
/// The token is validated against `token_prefix` first; a rejected token
/// never reaches the provider. The provider is called at most once and any
/// failure ends the run.
pub async fn run_preflight<P>(
    gate: &QuotaGate,
    provider: &P,
    token: &str,
    endpoint: &str,
    token_prefix: &str,
) -> Result<Decision, QuotaError>
where
    P: QuotaProvider + ?Sized,
{
    validate_token(token, token_prefix)?;

    let pool = gate.classify(endpoint);
    log::info!("[quota:preflight] Endpoint '{}' uses the {} pool", endpoint, pool);

    let snapshot = provider.fetch_snapshot(token).await?;
    let decision = gate.decide(pool, &snapshot)?;

    log::info!(
        "[quota:preflight] {} via {}: {}% remaining in {}",
        decision.outcome(),
        provider.provider_id(),
        decision.percent_remaining,
        decision.pool
    );
    Ok(decision)
}
