//! Output formatting module
//!
//! Provides text, table and JSON output for the check result.

use std::fmt::Display;

use colored::Colorize;
use ghgate_core::services::quota::format_reset;
use ghgate_core::Decision;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {}. Use 'text', 'table' or 'json'", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Decision row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct DecisionRow {
    #[tabled(rename = "Pool")]
    pub pool: String,
    #[tabled(rename = "Remaining")]
    pub remaining: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Resets At")]
    pub resets_at: String,
}

impl From<&Decision> for DecisionRow {
    fn from(decision: &Decision) -> Self {
        Self {
            pool: decision.pool.to_string(),
            remaining: format!("{}%", decision.percent_remaining),
            status: decision.outcome().to_string(),
            resets_at: decision
                .reset_at
                .map(format_reset)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Print a decision as text or a one-row table
pub fn print_decision(decision: &Decision, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            let table = Table::new([DecisionRow::from(decision)]).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => print_json(decision)?,
        OutputFormat::Text => {
            if decision.proceed {
                println!("{}", decision.message.green());
            } else {
                println!("{}", decision.message.yellow());
            }
        }
    }
    Ok(())
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use ghgate_core::Pool;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_decision_row() {
        let reset_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let blocked = Decision {
            proceed: false,
            percent_remaining: 6,
            pool: Pool::Search,
            reset_at: Some(reset_at),
            message: String::new(),
        };
        let row = DecisionRow::from(&blocked);
        assert_eq!(row.pool, "search");
        assert_eq!(row.remaining, "6%");
        assert_eq!(row.status, "blocked");
        assert_eq!(row.resets_at, format_reset(reset_at));

        let ok = Decision {
            proceed: true,
            reset_at: None,
            ..blocked
        };
        assert_eq!(DecisionRow::from(&ok).resets_at, "-");
    }
}
