//! Testing utilities for CodeArena
//!
//! This crate provides:
//! - Builders with fixed defaults for every listed record type
//! - Fixtures that fill records with `fake` data
//! - Proptest strategies for sortable records
//!
//! # Examples
//!
//! ```
//! use codearena_testing::builders::SubmissionBuilder;
//! use codearena_domain::{Measurement, SubmissionStatus};
//!
//! let record = SubmissionBuilder::new()
//!     .id("sub-1")
//!     .status(SubmissionStatus::WrongAnswer)
//!     .runtime(Measurement::NotAvailable)
//!     .build();
//! assert!(!record.runtime.is_available());
//! ```

pub mod builders;
pub mod fixtures;
pub mod strategies;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
