//! ghgate CLI - GitHub rate-limit preflight check
//!
//! Exits 0 when there is enough quota left for the given endpoint, 1 when
//! the caller should hold off or the check itself failed.

mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "ghgate")]
#[command(author, version, about = "Check GitHub API rate limits before making a call", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    check: commands::check::CheckArgs,

    /// Output format: text (default), table or json
    #[arg(long, default_value = "text")]
    format: output::OutputFormat,

    /// Suppress decision output in every format; errors are still reported
    #[arg(long, short)]
    quiet: bool,
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();

    // Create context for commands
    let ctx = commands::Context {
        format: cli.format,
        quiet: cli.quiet,
    };

    commands::check::execute(&ctx, cli.check).await
}
