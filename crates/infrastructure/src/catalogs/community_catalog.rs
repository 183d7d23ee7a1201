//! Discussion thread catalog.

use async_trait::async_trait;
use codearena_application::services::ThreadCatalog;
use codearena_application::ApplicationResult;
use codearena_domain::{DiscussionThread, ThreadId};

use super::{InMemoryCatalog, Keyed};
use crate::{seed, Result};

impl Keyed for DiscussionThread {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

pub type InMemoryThreadCatalog = InMemoryCatalog<DiscussionThread>;

impl InMemoryCatalog<DiscussionThread> {
    pub fn seeded() -> Result<Self> {
        Ok(Self::new(seed::threads()?))
    }
}

#[async_trait]
impl ThreadCatalog for InMemoryCatalog<DiscussionThread> {
    async fn list(&self) -> ApplicationResult<Vec<DiscussionThread>> {
        Ok(self.all())
    }

    async fn get_by_id(&self, id: &ThreadId) -> ApplicationResult<Option<DiscussionThread>> {
        Ok(self.find(id.as_str()))
    }
}
