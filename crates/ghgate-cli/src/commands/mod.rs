//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod check;

use crate::output::OutputFormat;

/// Shared context for all commands
pub struct Context {
    pub format: OutputFormat,
    pub quiet: bool,
}
