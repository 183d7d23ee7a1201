//! CodeArena CLI Library
//!
//! Terminal front end for the practice platform: problem browsing,
//! leaderboards, submission history, community threads, the code editor's
//! feedback and run simulation, the algorithm visualizer, the contest listing
//! and contest drafts.

pub mod commands;
pub mod output;
pub mod progress;

pub use commands::CommandContext;
pub use output::{JsonFormatter, OutputFormat, PlainFormatter, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
