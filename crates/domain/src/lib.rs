//! CodeArena Domain Types
//!
//! This crate provides the core record types for the CodeArena practice and
//! contest platform. Every record is constructed in memory and treated as
//! immutable once handed to the catalog layer.
//!
//! ## Architecture
//!
//! The domain layer is organized into the following modules:
//!
//! - **identifiers**: Strongly-typed identifiers for all records
//! - **problem**: Problems, difficulty levels and the topic taxonomy
//! - **leaderboard**: Ranked users, trends and achievements
//! - **submission**: Submission history records and their measurements
//! - **community**: Discussion threads and tags
//! - **contest**: Contest drafts, their validation rules and the contest schedule
//! - **visualization**: Pre-authored algorithm visualization steps
//! - **errors**: Error types with stable error codes
//! - **validation**: Validation result types
//!
//! ## Usage
//!
//! ```rust
//! use codearena_domain::{
//!     problem::Difficulty,
//!     submission::{Measurement, SubmissionStatus},
//! };
//!
//! let difficulty: Difficulty = "medium".parse().unwrap();
//! assert_eq!(difficulty.display_name(), "Medium");
//!
//! let runtime: Measurement = "56ms".parse().unwrap();
//! assert_eq!(runtime.value(), Some(56.0));
//!
//! assert_eq!(SubmissionStatus::WrongAnswer.to_string(), "Wrong Answer");
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Core domain modules
pub mod community;
pub mod contest;
pub mod errors;
pub mod identifiers;
pub mod leaderboard;
pub mod problem;
pub mod submission;
pub mod validation;
pub mod visualization;

// Re-export commonly used types
pub use errors::{AppError, AppResult};
pub use identifiers::*;
pub use validation::{IssueSeverity, ValidationIssue, ValidationResult};

// Re-export key domain types
pub use community::{DiscussionThread, TagKind, ThreadCategory, ThreadTag};
pub use contest::{ContestDraft, ContestPhase, ContestSummary, ContestTab, ContestVisibility};
pub use leaderboard::{Achievement, LeaderboardScope, LeaderboardUser, RankingTrend, TimeFrame};
pub use problem::{Difficulty, Problem, Topic};
pub use submission::{Measurement, SubmissionRecord, SubmissionStatus};
pub use visualization::{Frame, VisualizationStep};
