//! Submission history catalog.

use async_trait::async_trait;
use codearena_application::services::SubmissionCatalog;
use codearena_application::ApplicationResult;
use codearena_domain::{SubmissionId, SubmissionRecord};
use tracing::{debug, instrument};

use super::{InMemoryCatalog, Keyed};
use crate::{seed, Result};

impl Keyed for SubmissionRecord {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

pub type InMemorySubmissionCatalog = InMemoryCatalog<SubmissionRecord>;

impl InMemoryCatalog<SubmissionRecord> {
    pub fn seeded() -> Result<Self> {
        Ok(Self::new(seed::submissions()?))
    }
}

#[async_trait]
impl SubmissionCatalog for InMemoryCatalog<SubmissionRecord> {
    #[instrument(skip(self))]
    async fn list(&self) -> ApplicationResult<Vec<SubmissionRecord>> {
        debug!(count = self.len(), "Listing submissions");
        Ok(self.all())
    }

    async fn get_by_id(&self, id: &SubmissionId) -> ApplicationResult<Option<SubmissionRecord>> {
        Ok(self.find(id.as_str()))
    }
}
