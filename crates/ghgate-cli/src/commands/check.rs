//! Preflight check command
//!
//! Validates the token, fetches GitHub's rate-limit status and reports
//! whether a call to the given endpoint should go ahead.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Context as _, Result};
use clap::Args;
use serde::Serialize;

use ghgate_core::config::{
    DEFAULT_API_URL, DEFAULT_THRESHOLD_PERCENT, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_PREFIX,
};
use ghgate_core::{run_preflight, Decision, GateConfig, GitHubQuotaProvider, QuotaGate};

use super::Context;
use crate::output::{print_decision, print_error, print_json, OutputFormat};

/// Endpoint checked when none is given; always charged to the core pool
const DEFAULT_ENDPOINT: &str = "/user";

#[derive(Args)]
pub struct CheckArgs {
    /// Personal access token whose limits are checked
    #[arg(long, short, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub pat: Option<String>,

    /// Endpoint to check, e.g. `search`, `/search/issues`, `api.github.com/search/issues`
    #[arg(long, short, default_value = DEFAULT_ENDPOINT)]
    pub url: String,

    /// GitHub API base URL (GitHub Enterprise: https://HOST/api/v3)
    #[arg(long, env = "GHGATE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Prefix the token must start with
    #[arg(long, default_value = DEFAULT_TOKEN_PREFIX)]
    pub token_prefix: String,

    /// Minimum remaining percentage needed to proceed
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_PERCENT, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: u8,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

impl CheckArgs {
    fn to_config(&self) -> GateConfig {
        GateConfig::default()
            .with_api_url(self.api_url.as_str())
            .with_token_prefix(self.token_prefix.as_str())
            .with_threshold(self.threshold)
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

/// Machine-readable result printed with `--format json`
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    /// `proceed`, `blocked` or `error`
    pub status: &'static str,
    pub endpoint: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<&'a Decision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> CheckReport<'a> {
    pub fn from_decision(endpoint: &'a str, decision: &'a Decision) -> Self {
        Self {
            status: if decision.proceed { "proceed" } else { "blocked" },
            endpoint,
            decision: Some(decision),
            error: None,
        }
    }

    pub fn from_error(endpoint: &'a str, error: &anyhow::Error) -> Self {
        Self {
            status: "error",
            endpoint,
            decision: None,
            error: Some(format!("{:#}", error)),
        }
    }
}

pub async fn execute(ctx: &Context, args: CheckArgs) -> ExitCode {
    match check(&args).await {
        Ok(decision) => {
            if let Err(e) = report_decision(ctx, &args.url, &decision) {
                print_error(&format!("Failed to write output: {:#}", e));
                return ExitCode::FAILURE;
            }
            ExitCode::from(exit_status(&decision))
        }
        Err(e) => {
            log::debug!("[cli:check] Check failed: {:?}", e);
            report_error(ctx, &args.url, &e);
            ExitCode::FAILURE
        }
    }
}

/// 0 only when the caller may proceed
pub fn exit_status(decision: &Decision) -> u8 {
    if decision.proceed {
        0
    } else {
        1
    }
}

async fn check(args: &CheckArgs) -> Result<Decision> {
    let token = args
        .pat
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| anyhow!("No access token given. Pass --pat or set GITHUB_TOKEN"))?;

    let config = args.to_config();
    config.validate()?;

    let gate = QuotaGate::from_config(&config);
    let provider =
        GitHubQuotaProvider::new(&config).context("Failed to build the HTTP client")?;

    let decision = run_preflight(&gate, &provider, token, &args.url, &config.token_prefix).await?;
    Ok(decision)
}

/// Quiet mode silences every format; the exit status still carries the decision
fn report_decision(ctx: &Context, endpoint: &str, decision: &Decision) -> Result<()> {
    if ctx.quiet {
        return Ok(());
    }
    match ctx.format {
        OutputFormat::Json => print_json(&CheckReport::from_decision(endpoint, decision)),
        format => print_decision(decision, format),
    }
}

fn report_error(ctx: &Context, endpoint: &str, error: &anyhow::Error) {
    if ctx.format == OutputFormat::Json
        && print_json(&CheckReport::from_error(endpoint, error)).is_ok()
    {
        return;
    }
    print_error(&format!("{:#}", error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghgate_core::Pool;

    fn decision(proceed: bool) -> Decision {
        Decision {
            proceed,
            percent_remaining: if proceed { 12 } else { 6 },
            pool: Pool::Core,
            reset_at: None,
            message: String::new(),
        }
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&decision(true)), 0);
        assert_eq!(exit_status(&decision(false)), 1);
    }

    #[test]
    fn test_report_status() {
        let ok = decision(true);
        assert_eq!(CheckReport::from_decision("/user", &ok).status, "proceed");

        let blocked = decision(false);
        let report = CheckReport::from_decision("/search", &blocked);
        assert_eq!(report.status, "blocked");

        let err = anyhow!("Transport error: HTTP 500");
        let report = CheckReport::from_error("/user", &err);
        assert_eq!(report.status, "error");
        assert!(report.decision.is_none());
        assert_eq!(report.error.as_deref(), Some("Transport error: HTTP 500"));
    }

    #[test]
    fn test_args_to_config() {
        let args = CheckArgs {
            pat: Some("ghp_x".to_string()),
            url: "/user".to_string(),
            api_url: "https://ghe.example.com/api/v3/".to_string(),
            token_prefix: "ghp_".to_string(),
            threshold: 20,
            timeout: 5,
        };
        let config = args.to_config();
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.threshold_percent, 20);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_arg_defaults_match_core_config() {
        use clap::Parser;

        #[derive(Parser)]
        struct Harness {
            #[command(flatten)]
            check: CheckArgs,
        }

        let harness = Harness::try_parse_from(["ghgate", "--pat", "ghp_x", "--api-url", DEFAULT_API_URL]).unwrap();
        assert_eq!(harness.check.to_config(), GateConfig::default());
    }
}
