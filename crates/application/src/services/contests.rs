//! Contest Service
//!
//! Contest drafting: the problem picker over the contest pool, the selected
//! problem list and final draft validation. Also the upcoming and previous
//! contest tabs of the listing screen.

use crate::pipeline::{self, exact, text_search, Predicates, SortField, SortKey, SortState};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use codearena_common::{QueryText, SortDirection};
use codearena_domain::contest::PoolProblem;
use codearena_domain::errors::ContestError;
use codearena_domain::{ContestDraft, ContestSummary, ContestTab, Difficulty, ProblemId};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Read-only source of problems selectable for a contest
#[async_trait]
pub trait ContestProblemCatalog: Send + Sync {
    async fn list(&self) -> ApplicationResult<Vec<PoolProblem>>;
    async fn get_by_id(&self, id: &ProblemId) -> ApplicationResult<Option<PoolProblem>>;
}

/// Picker filters. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct PickerQuery {
    pub text: QueryText,
    pub difficulty: Option<Difficulty>,
    /// Compared case-insensitively against whole topic names
    pub topic: Option<String>,
}

impl PickerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<QueryText>) -> Self {
        self.text = text.into();
        self
    }

    pub fn difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn topic(mut self, topic: Option<impl Into<String>>) -> Self {
        self.topic = topic.map(Into::into);
        self
    }

    pub fn predicates(&self) -> Predicates<'static, PoolProblem> {
        let topic = self.topic.clone();
        Predicates::new()
            .with(text_search(self.text.clone(), |p: &PoolProblem| vec![p.title.as_str()]))
            .with(exact(self.difficulty, |p: &PoolProblem| p.difficulty))
            .with(move |p: &PoolProblem| {
                topic.as_deref().map_or(true, |wanted| {
                    p.topics.iter().any(|t| t.eq_ignore_ascii_case(wanted))
                })
            })
    }
}

/// Working state of the contest creation form.
#[derive(Debug, Clone)]
pub struct ContestBuilder {
    pool: Vec<PoolProblem>,
    selected: Vec<PoolProblem>,
    draft: ContestDraft,
}

impl ContestBuilder {
    pub fn new(pool: Vec<PoolProblem>) -> Self {
        Self {
            pool,
            selected: Vec::new(),
            draft: ContestDraft::default(),
        }
    }

    pub fn pool(&self) -> &[PoolProblem] {
        &self.pool
    }

    /// Selected problems in the order they were added
    pub fn selected(&self) -> &[PoolProblem] {
        &self.selected
    }

    pub fn is_selected(&self, id: &ProblemId) -> bool {
        self.selected.iter().any(|p| &p.id == id)
    }

    /// Add a pool problem. Returns `false` when it was already selected.
    pub fn add(&mut self, id: &ProblemId) -> ApplicationResult<bool> {
        if self.is_selected(id) {
            return Ok(false);
        }
        let problem = self
            .pool
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| ApplicationError::from(ContestError::UnknownPoolProblem(id.clone())))?;
        self.selected.push(problem);
        self.sync_problems();
        Ok(true)
    }

    /// Remove a selected problem. Returns `false` when it was not selected.
    pub fn remove(&mut self, id: &ProblemId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|p| &p.id != id);
        self.sync_problems();
        self.selected.len() != before
    }

    /// Pool problems matching the picker filters, in pool order
    pub fn picker(&self, query: &PickerQuery) -> Vec<PoolProblem> {
        pipeline::filter(&self.pool, &query.predicates())
    }

    /// Distinct topic names across the pool, sorted
    pub fn unique_topics(&self) -> Vec<String> {
        self.pool
            .iter()
            .flat_map(|p| p.topics.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn draft(&self) -> &ContestDraft {
        &self.draft
    }

    /// Form fields other than the problem list
    pub fn draft_mut(&mut self) -> &mut ContestDraft {
        &mut self.draft
    }

    fn sync_problems(&mut self) {
        self.draft.problems = self.selected.iter().map(|p| p.id.clone()).collect();
    }

    /// Validate the draft against `now` and hand it back when it passes.
    #[instrument(skip(self), fields(title = %self.draft.title, problems = self.selected.len()))]
    pub fn finalize(&self, now: DateTime<Utc>) -> ApplicationResult<ContestDraft> {
        let result = self.draft.validate_at(now);
        if !result.valid {
            warn!(errors = result.errors.len(), "Contest draft rejected");
            return Err(ApplicationError::ValidationFailed(result.summary()));
        }
        info!("Contest draft accepted");
        Ok(self.draft.clone())
    }
}

/// Contest service implementation
pub struct ContestService<C: ContestProblemCatalog> {
    catalog: Arc<C>,
}

impl<C: ContestProblemCatalog> ContestService<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// A fresh builder over the current pool
    #[instrument(skip(self))]
    pub async fn builder(&self) -> ApplicationResult<ContestBuilder> {
        let pool = self.catalog.list().await?;
        debug!(pool = pool.len(), "Contest builder created");
        Ok(ContestBuilder::new(pool))
    }

    /// Pool problems matching `query`
    #[instrument(skip(self, query))]
    pub async fn pool(&self, query: &PickerQuery) -> ApplicationResult<Vec<PoolProblem>> {
        Ok(self.builder().await?.picker(query))
    }
}

/// Read-only source of scheduled contests
#[async_trait]
pub trait ContestScheduleCatalog: Send + Sync {
    async fn list(&self) -> ApplicationResult<Vec<ContestSummary>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ByStart;

impl SortField for ByStart {}

impl SortKey<ContestSummary> for ByStart {
    fn ascending(self, a: &ContestSummary, b: &ContestSummary) -> Ordering {
        a.start.cmp(&b.start)
    }
}

/// Contests listed under `tab` at `now`.
///
/// Upcoming contests come soonest first, previous ones most recent first.
pub fn contest_tab(
    source: &[ContestSummary],
    tab: ContestTab,
    now: DateTime<Utc>,
) -> Vec<ContestSummary> {
    let predicates =
        Predicates::new().with(move |c: &ContestSummary| tab.includes(c.phase_at(now)));
    let direction = match tab {
        ContestTab::Upcoming => SortDirection::Asc,
        ContestTab::Previous => SortDirection::Desc,
    };
    pipeline::apply(source, &predicates, &SortState::with_direction(ByStart, direction))
}

/// Contest listing service
pub struct ContestListingService<S: ContestScheduleCatalog> {
    schedule: Arc<S>,
}

impl<S: ContestScheduleCatalog> ContestListingService<S> {
    pub fn new(schedule: Arc<S>) -> Self {
        Self { schedule }
    }

    /// One tab of the contest listing
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        tab: ContestTab,
        now: DateTime<Utc>,
    ) -> ApplicationResult<Vec<ContestSummary>> {
        let source = self.schedule.list().await?;
        let rows = contest_tab(&source, tab, now);
        debug!(total = source.len(), shown = rows.len(), "Contest tab listed");
        Ok(rows)
    }
}
