//! Problem Service
//!
//! Problem browsing: difficulty and topic filters, title/topic search and the
//! three sort orders of the problem list.

use crate::pipeline::{self, any_of, exact, text_search, Predicates, SortField, SortKey, SortState};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use codearena_common::QueryText;
use codearena_domain::errors::{CatalogError, QueryError};
use codearena_domain::{Difficulty, Problem, ProblemId, Topic};
use indexmap::IndexSet;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Read-only problem source
#[async_trait]
pub trait ProblemCatalog: Send + Sync {
    async fn list(&self) -> ApplicationResult<Vec<Problem>>;
    async fn get_by_id(&self, id: &ProblemId) -> ApplicationResult<Option<Problem>>;
}

/// Problem list sort keys; all start descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProblemSort {
    #[default]
    Popularity,
    Newest,
    MostAttempted,
}

impl ProblemSort {
    pub const ALL: [ProblemSort; 3] = [Self::Popularity, Self::Newest, Self::MostAttempted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Newest => "newest",
            Self::MostAttempted => "most-attempted",
        }
    }
}

impl SortField for ProblemSort {}

impl SortKey<Problem> for ProblemSort {
    fn ascending(self, a: &Problem, b: &Problem) -> Ordering {
        match self {
            Self::Popularity => a.popularity.cmp(&b.popularity),
            Self::Newest => a.created_at.cmp(&b.created_at),
            Self::MostAttempted => a.attempt_count.cmp(&b.attempt_count),
        }
    }
}

impl fmt::Display for ProblemSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemSort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popularity" | "popular" => Ok(Self::Popularity),
            "newest" | "new" => Ok(Self::Newest),
            "most-attempted" | "attempts" => Ok(Self::MostAttempted),
            _ => Err(QueryError::UnknownSortKey {
                value: s.to_string(),
                allowed: "popularity, newest, most-attempted",
            }),
        }
    }
}

/// Filter and sort selections of the problem list.
#[derive(Debug, Clone, Default)]
pub struct ProblemQuery {
    pub difficulty: Option<Difficulty>,
    pub topics: IndexSet<Topic>,
    pub text: QueryText,
    pub sort: SortState<ProblemSort>,
}

impl ProblemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn topics(mut self, topics: impl IntoIterator<Item = Topic>) -> Self {
        self.topics = topics.into_iter().collect();
        self
    }

    pub fn search(mut self, text: impl Into<QueryText>) -> Self {
        self.text = text.into();
        self
    }

    pub fn sort(mut self, sort: SortState<ProblemSort>) -> Self {
        self.sort = sort;
        self
    }

    /// Add the topic if unselected, otherwise remove it
    pub fn toggle_topic(&mut self, topic: Topic) {
        if !self.topics.shift_remove(&topic) {
            self.topics.insert(topic);
        }
    }

    /// Reset every filter; the sort selection stays
    pub fn clear_filters(&mut self) {
        self.difficulty = None;
        self.topics.clear();
        self.text = QueryText::default();
    }

    /// Number of active filters, for the "Active filters" summary
    pub fn active_filter_count(&self) -> usize {
        usize::from(self.difficulty.is_some()) + self.topics.len() + usize::from(!self.text.is_blank())
    }

    pub fn predicates(&self) -> Predicates<'static, Problem> {
        Predicates::new()
            .with(exact(self.difficulty, |p: &Problem| p.difficulty))
            .with(any_of(self.topics.clone(), |p: &Problem| &p.topics))
            .with(text_search(self.text.clone(), |p: &Problem| {
                let mut fields: Vec<&str> = vec![p.title.as_str()];
                for name in p.topic_names() {
                    fields.push(name);
                }
                fields
            }))
    }

    /// Rows to show for `source`
    pub fn apply(&self, source: &[Problem]) -> Vec<Problem> {
        pipeline::apply(source, &self.predicates(), &self.sort)
    }
}

/// Problem service implementation
pub struct ProblemService<C: ProblemCatalog> {
    catalog: Arc<C>,
}

impl<C: ProblemCatalog> ProblemService<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Filtered, sorted problem list
    #[instrument(skip(self, query), fields(sort = %query.sort.key, direction = %query.sort.direction))]
    pub async fn list(&self, query: &ProblemQuery) -> ApplicationResult<Vec<Problem>> {
        let source = self.catalog.list().await?;
        let rows = query.apply(&source);
        debug!(total = source.len(), shown = rows.len(), "Problems filtered");
        Ok(rows)
    }

    /// Get one problem
    #[instrument(skip(self))]
    pub async fn get(&self, id: &ProblemId) -> ApplicationResult<Problem> {
        self.catalog
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::from(CatalogError::ProblemNotFound(id.clone())))
    }
}
