//! CLI commands
//!
//! Every command returns its rendered output instead of printing, so the
//! binary decides where it goes and tests can inspect it.

pub mod community;
pub mod contest;
pub mod editor;
pub mod leaderboard;
pub mod problems;
pub mod submissions;
pub mod visualize;

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use codearena_application::SyntaxFeedback;
use codearena_common::{AppConfig, SortDirection};
use codearena_infrastructure::Catalogs;
use std::sync::Arc;
use tracing::debug;

/// Context passed to all commands
pub struct CommandContext {
    pub config: AppConfig,
    pub catalogs: Catalogs,
    pub feedback: Arc<SyntaxFeedback>,
    pub format: OutputFormat,
    /// Clock reading the contest schedule was seeded against
    pub now: DateTime<Utc>,
}

impl CommandContext {
    /// Seed the catalogs and build the shared feedback engine
    pub fn new(config: AppConfig, format: OutputFormat) -> Result<Self> {
        let now = Utc::now();
        let catalogs = Catalogs::seeded_at(now).context("Failed to load seed catalogs")?;
        debug!(
            problems = catalogs.problems.len(),
            submissions = catalogs.submissions.len(),
            %format,
            "Command context ready"
        );
        Ok(Self {
            config,
            catalogs,
            feedback: Arc::new(SyntaxFeedback::default()),
            format,
            now,
        })
    }
}

/// `--order` values; absent means the sort key's own default
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Order {
    Asc,
    Desc,
}

impl From<Order> for SortDirection {
    fn from(order: Order) -> Self {
        match order {
            Order::Asc => SortDirection::Asc,
            Order::Desc => SortDirection::Desc,
        }
    }
}
