//! Error types for the CodeArena domain.
//!
//! Errors are grouped by concern. Each group folds into [`AppError`], which
//! carries a stable machine-readable code for the JSON output of the CLI.

use crate::identifiers::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Catalog lookups
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Malformed query selections
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Contest drafting
    #[error("Contest error: {0}")]
    Contest(#[from] ContestError),

    /// Field-level validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(e) => e.error_code(),
            Self::Query(_) => "INVALID_QUERY",
            Self::Contest(_) => "CONTEST_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Process exit code used by the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Catalog(_) => 3,
            Self::Query(_) | Self::Validation(_) | Self::Contest(_) => 2,
            Self::Internal(_) => 1,
        }
    }

    /// Whether the error is a missing-record lookup
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Catalog(
                CatalogError::ProblemNotFound(_)
                    | CatalogError::UserNotFound(_)
                    | CatalogError::SubmissionNotFound(_)
                    | CatalogError::ThreadNotFound(_)
            )
        )
    }
}

/// Catalog lookup errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Problem not found
    #[error("Problem not found: {0}")]
    ProblemNotFound(ProblemId),

    /// Leaderboard user not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Submission not found
    #[error("Submission not found: {0}")]
    SubmissionNotFound(SubmissionId),

    /// Discussion thread not found
    #[error("Thread not found: {0}")]
    ThreadNotFound(ThreadId),
}

impl CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ProblemNotFound(_) => "PROBLEM_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::SubmissionNotFound(_) => "SUBMISSION_NOT_FOUND",
            Self::ThreadNotFound(_) => "THREAD_NOT_FOUND",
        }
    }
}

/// A UI selection string outside its fixed allowed set.
///
/// Screens only ever offer valid choices, so reaching one of these is a
/// programmer error surfaced at the parsing edge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Unknown sort key
    #[error("unknown sort key '{value}' (expected one of: {allowed})")]
    UnknownSortKey {
        /// The rejected value
        value: String,
        /// Comma-separated allowed values
        allowed: &'static str,
    },

    /// Unknown difficulty
    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),

    /// Unknown submission status
    #[error("unknown submission status '{0}'")]
    UnknownStatus(String),

    /// Unknown date window
    #[error("unknown date window '{0}' (expected all, today, week or month)")]
    UnknownDateWindow(String),

    /// Unknown topic id
    #[error("unknown topic '{0}'")]
    UnknownTopic(String),

    /// Unknown leaderboard scope or time frame
    #[error("unknown leaderboard option '{0}'")]
    UnknownLeaderboardOption(String),

    /// Unknown community category
    #[error("unknown thread category '{0}'")]
    UnknownCategory(String),

    /// Unparseable measurement text
    #[error("invalid measurement '{0}'")]
    InvalidMeasurement(String),
}

/// Contest drafting errors
#[derive(Debug, thiserror::Error)]
pub enum ContestError {
    /// Problem is not part of the selectable pool
    #[error("Problem {0} is not in the contest pool")]
    UnknownPoolProblem(ProblemId),

    /// Draft failed validation
    #[error("Contest draft is invalid: {0}")]
    InvalidDraft(String),
}

/// Field validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Required field missing
    #[error("Required field missing: {0}")]
    RequiredField(String),

    /// Value out of range
    #[error("Value out of range for {field}: {value} not in [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// Offending value
        value: i64,
        /// Inclusive minimum
        min: i64,
        /// Inclusive maximum
        max: i64,
    },

    /// Field-specific error
    #[error("Invalid {field}: {message}")]
    InvalidField {
        /// Field name
        field: String,
        /// Reason
        message: String,
    },
}

/// Structured error body written by `--format json`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,

    /// When the error occurred
    pub timestamp: DateTime<Utc>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: ErrorDetail {
                code: error.error_code().to_string(),
                message: error.to_string(),
            },
            timestamp: Utc::now(),
        }
    }
}

/// Application-wide result type
pub type AppResult<T> = Result<T, AppError>;

/// Result type for selection parsing
pub type QueryResult<T> = Result<T, QueryError>;
