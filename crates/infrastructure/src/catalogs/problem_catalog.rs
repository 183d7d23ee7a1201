//! Practice problem catalog.

use async_trait::async_trait;
use codearena_application::services::ProblemCatalog;
use codearena_application::ApplicationResult;
use codearena_domain::{Problem, ProblemId};
use tracing::{debug, instrument};

use super::{InMemoryCatalog, Keyed};
use crate::seed;

impl Keyed for Problem {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

pub type InMemoryProblemCatalog = InMemoryCatalog<Problem>;

impl InMemoryCatalog<Problem> {
    /// The generated twenty-problem catalog
    pub fn seeded() -> Self {
        Self::new(seed::problems())
    }
}

#[async_trait]
impl ProblemCatalog for InMemoryCatalog<Problem> {
    #[instrument(skip(self))]
    async fn list(&self) -> ApplicationResult<Vec<Problem>> {
        debug!(count = self.len(), "Listing problems");
        Ok(self.all())
    }

    async fn get_by_id(&self, id: &ProblemId) -> ApplicationResult<Option<Problem>> {
        Ok(self.find(id.as_str()))
    }
}
