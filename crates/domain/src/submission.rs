//! Submission history records.

use crate::errors::QueryError;
use crate::identifiers::{ProblemId, SubmissionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Judge verdict for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// All tests passed
    #[serde(rename = "Accepted")]
    Accepted,
    /// Some output was wrong
    #[serde(rename = "Wrong Answer")]
    WrongAnswer,
    /// Ran past the time limit
    #[serde(rename = "Time Limit Exceeded")]
    TimeLimitExceeded,
    /// Ran past the memory limit
    #[serde(rename = "Memory Limit Exceeded")]
    MemoryLimitExceeded,
    /// Crashed while running
    #[serde(rename = "Runtime Error")]
    RuntimeError,
    /// Failed to compile
    #[serde(rename = "Compilation Error")]
    CompilationError,
}

impl SubmissionStatus {
    /// Every status, in display order
    pub const ALL: [SubmissionStatus; 6] = [
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::RuntimeError,
        Self::CompilationError,
    ];

    /// Label as shown in history, e.g. "Time Limit Exceeded"
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "Wrong Answer",
            Self::TimeLimitExceeded => "Time Limit Exceeded",
            Self::MemoryLimitExceeded => "Memory Limit Exceeded",
            Self::RuntimeError => "Runtime Error",
            Self::CompilationError => "Compilation Error",
        }
    }

    /// Whether the verdict is a pass
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SubmissionStatus {
    type Err = QueryError;

    /// Accepts the display label or its kebab/snake form
    /// ("Wrong Answer", "wrong-answer", "wrong_answer").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| QueryError::UnknownStatus(s.to_string()))
    }
}

/// A runtime or memory figure as reported by the judge.
///
/// Parses from and displays as `56ms`, `42.1MB` or `N/A`. `N/A` is its own
/// state and never reads as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Measurement {
    /// Milliseconds
    Millis(f64),
    /// Megabytes
    Megabytes(f64),
    /// Not measured
    NotAvailable,
}

impl Measurement {
    /// Text used for the unmeasured state
    pub const NOT_AVAILABLE: &'static str = "N/A";

    /// Numeric value, if measured
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Millis(v) | Self::Megabytes(v) => Some(*v),
            Self::NotAvailable => None,
        }
    }

    /// Whether a value is present
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::NotAvailable)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(v) => write!(f, "{v}ms"),
            Self::Megabytes(v) => write!(f, "{v}MB"),
            Self::NotAvailable => f.write_str(Self::NOT_AVAILABLE),
        }
    }
}

impl FromStr for Measurement {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case(Self::NOT_AVAILABLE) {
            return Ok(Self::NotAvailable);
        }

        let invalid = || QueryError::InvalidMeasurement(s.to_string());
        let parse = |number: &str| {
            number
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(invalid)
        };

        if let Some(number) = text.strip_suffix("ms") {
            parse(number).map(Self::Millis)
        } else if let Some(number) = text.strip_suffix("MB") {
            parse(number).map(Self::Megabytes)
        } else {
            Err(invalid())
        }
    }
}

impl TryFrom<String> for Measurement {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Measurement> for String {
    fn from(value: Measurement) -> Self {
        value.to_string()
    }
}

/// One past submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Submission id
    pub id: SubmissionId,
    /// Weak reference; the problem may not exist in the current catalog
    pub problem_id: ProblemId,
    /// Title captured at submission time
    pub problem_title: String,
    /// When the code was submitted
    pub timestamp: DateTime<Utc>,
    /// Judge verdict
    pub status: SubmissionStatus,
    /// Runtime in milliseconds
    pub runtime: Measurement,
    /// Peak memory in megabytes
    pub memory: Measurement,
    /// Language name as selected
    pub language: String,
    /// Submitted source
    pub code: String,
}
