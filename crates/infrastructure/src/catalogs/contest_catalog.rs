//! Contest problem pool and contest schedule catalogs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use codearena_application::services::{ContestProblemCatalog, ContestScheduleCatalog};
use codearena_application::ApplicationResult;
use codearena_domain::contest::{ContestSummary, PoolProblem};
use codearena_domain::ProblemId;

use super::{InMemoryCatalog, Keyed};
use crate::{seed, Result};

impl Keyed for PoolProblem {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

pub type InMemoryContestPool = InMemoryCatalog<PoolProblem>;

impl InMemoryCatalog<PoolProblem> {
    pub fn seeded() -> Result<Self> {
        Ok(Self::new(seed::contest_pool()?))
    }
}

#[async_trait]
impl ContestProblemCatalog for InMemoryCatalog<PoolProblem> {
    async fn list(&self) -> ApplicationResult<Vec<PoolProblem>> {
        Ok(self.all())
    }

    async fn get_by_id(&self, id: &ProblemId) -> ApplicationResult<Option<PoolProblem>> {
        Ok(self.find(id.as_str()))
    }
}

impl Keyed for ContestSummary {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

pub type InMemoryContestSchedule = InMemoryCatalog<ContestSummary>;

impl InMemoryCatalog<ContestSummary> {
    /// Seeded schedule with start and end times counted from `now`
    pub fn seeded_at(now: DateTime<Utc>) -> Result<Self> {
        Ok(Self::new(seed::contests(now)?))
    }
}

#[async_trait]
impl ContestScheduleCatalog for InMemoryCatalog<ContestSummary> {
    async fn list(&self) -> ApplicationResult<Vec<ContestSummary>> {
        Ok(self.all())
    }
}
