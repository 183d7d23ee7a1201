//! Infrastructure layer for CodeArena
//!
//! This crate provides the in-memory implementations of the application's
//! catalog ports:
//! - Problems (twenty generated records)
//! - Leaderboards (global and friends)
//! - Submission history
//! - Community threads
//! - The contest problem pool
//! - The contest schedule, relative to the time of seeding
//!
//! ## Usage
//!
//! ```rust,no_run
//! use codearena_application::services::{ProblemQuery, ProblemService};
//! use codearena_infrastructure::Catalogs;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let catalogs = Catalogs::seeded()?;
//! let service = ProblemService::new(catalogs.problems.clone());
//! let rows = service.list(&ProblemQuery::new().search("two sum")).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalogs;
pub mod seed;

pub use catalogs::{
    InMemoryCatalog, InMemoryContestPool, InMemoryContestSchedule, InMemoryLeaderboard,
    InMemoryProblemCatalog, InMemorySubmissionCatalog, InMemoryThreadCatalog, Keyed,
};

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An embedded seed file did not match the record schema
    #[error("Seed data '{name}' is invalid: {source}")]
    Seed {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Every seeded catalog, shared behind `Arc` so services can hold them.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub problems: Arc<InMemoryProblemCatalog>,
    pub leaderboard: Arc<InMemoryLeaderboard>,
    pub submissions: Arc<InMemorySubmissionCatalog>,
    pub threads: Arc<InMemoryThreadCatalog>,
    pub contest_pool: Arc<InMemoryContestPool>,
    pub contests: Arc<InMemoryContestSchedule>,
}

impl Catalogs {
    /// Load all seed data, scheduling contests around the current time
    pub fn seeded() -> Result<Self> {
        Self::seeded_at(Utc::now())
    }

    /// Load all seed data with contest times counted from `now`
    pub fn seeded_at(now: DateTime<Utc>) -> Result<Self> {
        let catalogs = Self {
            problems: Arc::new(InMemoryProblemCatalog::seeded()),
            leaderboard: Arc::new(InMemoryLeaderboard::seeded()?),
            submissions: Arc::new(InMemorySubmissionCatalog::seeded()?),
            threads: Arc::new(InMemoryThreadCatalog::seeded()?),
            contest_pool: Arc::new(InMemoryContestPool::seeded()?),
            contests: Arc::new(InMemoryContestSchedule::seeded_at(now)?),
        };
        info!(
            problems = catalogs.problems.len(),
            submissions = catalogs.submissions.len(),
            threads = catalogs.threads.len(),
            contests = catalogs.contests.len(),
            "Catalogs seeded"
        );
        Ok(catalogs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_error_names_the_file() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = Error::Seed {
            name: "threads",
            source,
        };
        assert!(err.to_string().starts_with("Seed data 'threads' is invalid"));
    }
}
