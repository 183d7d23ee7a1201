//! Application layer for CodeArena
//!
//! This crate holds everything the screens compute: the filter/sort pipeline,
//! the per-screen services, the syntax feedback heuristic and the timed
//! editor and visualizer behavior.
//!
//! ## Architecture
//!
//! Services depend only on the catalog ports defined here. The
//! infrastructure crate supplies in-memory implementations.
//!
//! ## Modules
//!
//! - `pipeline` - Generic predicates, sort keys and the apply step
//! - `services` - Catalog ports and per-screen services
//! - `feedback` - Syntax feedback rule engine and language checkers
//! - `editor` - Debounced feedback, simulated runs, buffer handling
//! - `visualizer` - Step player for algorithm walkthroughs

pub mod editor;
pub mod feedback;
pub mod pipeline;
pub mod services;
pub mod visualizer;

// Re-export commonly used types
pub use editor::{CodeRunner, Debouncer, EditorSession, RunOutcome};
pub use feedback::{CheckerRegistry, Hint, HintKind, ParseOutcome, SyntaxChecker, SyntaxFeedback};
pub use pipeline::{Predicates, SortKey, SortState};
pub use services::{
    CommunityService, ContestBuilder, ContestListingService, ContestService, LeaderboardService,
    PerformanceStats, ProblemService, SubmissionService,
};
pub use visualizer::StepPlayer;

use codearena_domain::errors::{AppError, CatalogError, ContestError, QueryError};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    /// Record not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A single-flight operation is already running
    #[error("Busy: {0}")]
    Busy(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Get error code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::Busy(_) => "BUSY",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Process exit code for the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            ApplicationError::NotFound(_) => 3,
            ApplicationError::InvalidInput(_) | ApplicationError::ValidationFailed(_) => 2,
            ApplicationError::Busy(_) | ApplicationError::Internal(_) => 1,
        }
    }
}

impl From<AppError> for ApplicationError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Catalog(e) => ApplicationError::NotFound(e.to_string()),
            AppError::Query(e) => ApplicationError::InvalidInput(e.to_string()),
            AppError::Contest(ContestError::UnknownPoolProblem(id)) => {
                ApplicationError::NotFound(format!("Problem {id} is not in the contest pool"))
            }
            AppError::Contest(e) => ApplicationError::ValidationFailed(e.to_string()),
            AppError::Validation(e) => ApplicationError::ValidationFailed(e.to_string()),
            AppError::Internal(msg) => ApplicationError::Internal(msg),
        }
    }
}

impl From<CatalogError> for ApplicationError {
    fn from(err: CatalogError) -> Self {
        AppError::from(err).into()
    }
}

impl From<QueryError> for ApplicationError {
    fn from(err: QueryError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ContestError> for ApplicationError {
    fn from(err: ContestError) -> Self {
        AppError::from(err).into()
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
