//! Community Service
//!
//! Discussion thread listing with category buttons and free-text search.
//! Threads keep their authored order.

use crate::pipeline::{self, text_search, Predicates};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use codearena_common::QueryText;
use codearena_domain::errors::CatalogError;
use codearena_domain::{DiscussionThread, ThreadCategory, ThreadId};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Read-only thread source
#[async_trait]
pub trait ThreadCatalog: Send + Sync {
    async fn list(&self) -> ApplicationResult<Vec<DiscussionThread>>;
    async fn get_by_id(&self, id: &ThreadId) -> ApplicationResult<Option<DiscussionThread>>;
}

/// Whether any of the thread's tag kinds falls in `category`
fn in_category(thread: &DiscussionThread, category: ThreadCategory) -> bool {
    match category.kind_fragment() {
        None => true,
        Some(fragment) => thread
            .tags
            .iter()
            .any(|tag| tag.kind.as_str().contains(fragment)),
    }
}

/// Selections of the community screen.
#[derive(Debug, Clone, Default)]
pub struct ThreadQuery {
    pub category: ThreadCategory,
    pub text: QueryText,
}

impl ThreadQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: ThreadCategory) -> Self {
        self.category = category;
        self
    }

    pub fn search(mut self, text: impl Into<QueryText>) -> Self {
        self.text = text.into();
        self
    }

    pub fn predicates(&self) -> Predicates<'static, DiscussionThread> {
        let category = self.category;
        Predicates::new()
            .with(move |t: &DiscussionThread| in_category(t, category))
            .with(text_search(self.text.clone(), |t: &DiscussionThread| {
                let mut fields = vec![t.title.as_str(), t.content.as_str()];
                fields.extend(t.tags.iter().map(|tag| tag.name.as_str()));
                fields
            }))
    }

    pub fn apply(&self, source: &[DiscussionThread]) -> Vec<DiscussionThread> {
        pipeline::filter(source, &self.predicates())
    }
}

/// Community service implementation
pub struct CommunityService<C: ThreadCatalog> {
    catalog: Arc<C>,
}

impl<C: ThreadCatalog> CommunityService<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    #[instrument(skip(self, query), fields(category = %query.category))]
    pub async fn list(&self, query: &ThreadQuery) -> ApplicationResult<Vec<DiscussionThread>> {
        let source = self.catalog.list().await?;
        let rows = query.apply(&source);
        debug!(total = source.len(), shown = rows.len(), "Threads filtered");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &ThreadId) -> ApplicationResult<DiscussionThread> {
        self.catalog
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::from(CatalogError::ThreadNotFound(id.clone())))
    }
}
