//! Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

mod formatters;
mod table;

pub use formatters::{JsonFormatter, PlainFormatter};
pub use table::TableFormatter;

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table output (default)
    #[default]
    Table,
    /// Plain text output
    Plain,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// Render `value` in `format`. Table output is screen-specific, so the
/// caller supplies it; JSON and plain are derived from the serialized form.
pub fn render<T, F>(format: OutputFormat, value: &T, table: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> Result<String>,
{
    match format {
        OutputFormat::Json => JsonFormatter::format(value),
        OutputFormat::Plain => PlainFormatter::format(value),
        OutputFormat::Table => table(),
    }
}

/// Color helpers
pub mod colors {
    use codearena_domain::{Difficulty, RankingTrend, SubmissionStatus};
    use colored::*;

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    pub fn bold(s: &str) -> ColoredString {
        s.bold()
    }

    pub fn difficulty(d: Difficulty) -> ColoredString {
        match d {
            Difficulty::Easy => d.display_name().green(),
            Difficulty::Medium => d.display_name().yellow(),
            Difficulty::Hard => d.display_name().red(),
        }
    }

    pub fn status(s: SubmissionStatus) -> ColoredString {
        if s.is_accepted() {
            s.label().green()
        } else {
            s.label().red()
        }
    }

    pub fn trend(trend: RankingTrend, marker: &str) -> ColoredString {
        match trend {
            RankingTrend::Up => marker.green(),
            RankingTrend::Down => marker.red(),
            RankingTrend::Stable => marker.dimmed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Plain.to_string(), "plain");
    }

    #[test]
    fn test_output_format_value_enum() {
        assert_eq!(OutputFormat::from_str("json", true), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("PLAIN", true), Ok(OutputFormat::Plain));
        assert!(OutputFormat::from_str("yaml", true).is_err());
    }

    #[test]
    fn test_render_picks_formatter() {
        let value = vec!["a", "b"];
        let json = render(OutputFormat::Json, &value, || Ok("table".into())).unwrap();
        assert!(json.contains("\"a\""));
        let table = render(OutputFormat::Table, &value, || Ok("table".into())).unwrap();
        assert_eq!(table, "table");
    }
}
