//! Submission Service
//!
//! Submission history: status, date window and title filters, runtime and
//! memory sorting, performance statistics and side-by-side comparison.
//! `N/A` measurements are excluded from every aggregate and sort after all
//! measured values.

use crate::pipeline::{
    self, compare_measurements, exact, text_search, within_window, Predicates, SortField,
    SortKey, SortState,
};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use codearena_common::{DateWindow, QueryText, SortDirection};
use codearena_domain::errors::{CatalogError, QueryError};
use codearena_domain::{Measurement, SubmissionId, SubmissionRecord, SubmissionStatus};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of points in the recent-runtime chart
pub const RECENT_RUNTIME_POINTS: usize = 5;

/// Read-only submission source
#[async_trait]
pub trait SubmissionCatalog: Send + Sync {
    async fn list(&self) -> ApplicationResult<Vec<SubmissionRecord>>;
    async fn get_by_id(&self, id: &SubmissionId) -> ApplicationResult<Option<SubmissionRecord>>;
}

/// Submission history sort keys; all start descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubmissionSort {
    #[default]
    Newest,
    Runtime,
    Memory,
}

impl SubmissionSort {
    pub const ALL: [SubmissionSort; 3] = [Self::Newest, Self::Runtime, Self::Memory];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Runtime => "runtime",
            Self::Memory => "memory",
        }
    }
}

impl SortField for SubmissionSort {}

impl SortKey<SubmissionRecord> for SubmissionSort {
    fn ascending(self, a: &SubmissionRecord, b: &SubmissionRecord) -> Ordering {
        self.compare(a, b, SortDirection::Asc)
    }

    fn compare(self, a: &SubmissionRecord, b: &SubmissionRecord, direction: SortDirection) -> Ordering {
        match self {
            Self::Newest => direction.apply(a.timestamp.cmp(&b.timestamp)),
            Self::Runtime => compare_measurements(&a.runtime, &b.runtime, direction),
            Self::Memory => compare_measurements(&a.memory, &b.memory, direction),
        }
    }
}

impl fmt::Display for SubmissionSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionSort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "date" => Ok(Self::Newest),
            "runtime" => Ok(Self::Runtime),
            "memory" => Ok(Self::Memory),
            _ => Err(QueryError::UnknownSortKey {
                value: s.to_string(),
                allowed: "newest, runtime, memory",
            }),
        }
    }
}

/// Selections of the submission history screen.
#[derive(Debug, Clone, Default)]
pub struct SubmissionQuery {
    pub status: Option<SubmissionStatus>,
    pub window: DateWindow,
    pub text: QueryText,
    pub sort: SortState<SubmissionSort>,
}

impl SubmissionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: Option<SubmissionStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    pub fn search(mut self, text: impl Into<QueryText>) -> Self {
        self.text = text.into();
        self
    }

    pub fn sort(mut self, sort: SortState<SubmissionSort>) -> Self {
        self.sort = sort;
        self
    }

    /// Predicates with the date window ending at `now`
    pub fn predicates(&self, now: DateTime<Utc>) -> Predicates<'static, SubmissionRecord> {
        Predicates::new()
            .with(exact(self.status, |s: &SubmissionRecord| s.status))
            .with(within_window(self.window, now, |s: &SubmissionRecord| s.timestamp))
            .with(text_search(self.text.clone(), |s: &SubmissionRecord| {
                vec![s.problem_title.as_str()]
            }))
    }

    pub fn apply(&self, source: &[SubmissionRecord], now: DateTime<Utc>) -> Vec<SubmissionRecord> {
        pipeline::apply(source, &self.predicates(now), &self.sort)
    }
}

/// Aggregates over a submission list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceStats {
    pub total: usize,
    pub accepted: usize,
    /// Rounded percentage of accepted submissions, 0 when empty
    pub acceptance_rate: u32,
    /// Rounded mean over measured runtimes
    pub average_runtime_ms: Option<u32>,
    /// Mean over measured memory
    pub average_memory_mb: Option<f64>,
}

impl PerformanceStats {
    pub fn compute(submissions: &[SubmissionRecord]) -> Self {
        let total = submissions.len();
        let accepted = submissions.iter().filter(|s| s.status.is_accepted()).count();
        let acceptance_rate = if total == 0 {
            0
        } else {
            (accepted as f64 / total as f64 * 100.0).round() as u32
        };

        Self {
            total,
            accepted,
            acceptance_rate,
            average_runtime_ms: mean(submissions.iter().map(|s| &s.runtime))
                .map(|avg| avg.round() as u32),
            average_memory_mb: mean(submissions.iter().map(|s| &s.memory)),
        }
    }
}

/// Mean of the measured values; `None` when nothing was measured
fn mean<'a>(values: impl Iterator<Item = &'a Measurement>) -> Option<f64> {
    let (sum, count) = values
        .filter_map(Measurement::value)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// One bar of the recent performance chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimePoint {
    pub label: String,
    pub problem_title: String,
    pub runtime_ms: f64,
    pub memory_mb: Option<f64>,
    pub status: SubmissionStatus,
}

/// First `n` submissions that have a measured runtime, in list order.
pub fn recent_runtimes(submissions: &[SubmissionRecord], n: usize) -> Vec<RuntimePoint> {
    submissions
        .iter()
        .filter_map(|s| {
            s.runtime.value().map(|runtime_ms| RuntimePoint {
                label: chart_label(&s.problem_title),
                problem_title: s.problem_title.clone(),
                runtime_ms,
                memory_mb: s.memory.value(),
                status: s.status,
            })
        })
        .take(n)
        .collect()
}

/// First ten characters of the title followed by an ellipsis
fn chart_label(title: &str) -> String {
    let head: String = title.chars().take(10).collect();
    format!("{head}...")
}

/// Two submissions side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionComparison {
    /// The earlier selection
    pub baseline: SubmissionRecord,
    pub selected: SubmissionRecord,
    /// `selected - baseline`, when both were measured
    pub runtime_delta_ms: Option<f64>,
    pub memory_delta_mb: Option<f64>,
}

impl SubmissionComparison {
    pub fn new(baseline: SubmissionRecord, selected: SubmissionRecord) -> Self {
        let delta = |a: &Measurement, b: &Measurement| Some(b.value()? - a.value()?);
        Self {
            runtime_delta_ms: delta(&baseline.runtime, &selected.runtime),
            memory_delta_mb: delta(&baseline.memory, &selected.memory),
            baseline,
            selected,
        }
    }
}

/// Submission service implementation
pub struct SubmissionService<C: SubmissionCatalog> {
    catalog: Arc<C>,
}

impl<C: SubmissionCatalog> SubmissionService<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Filtered, sorted history relative to `now`
    #[instrument(skip(self, query), fields(window = %query.window, sort = %query.sort.key))]
    pub async fn list(
        &self,
        query: &SubmissionQuery,
        now: DateTime<Utc>,
    ) -> ApplicationResult<Vec<SubmissionRecord>> {
        let source = self.catalog.list().await?;
        let rows = query.apply(&source, now);
        debug!(total = source.len(), shown = rows.len(), "Submissions filtered");
        Ok(rows)
    }

    /// Get one submission
    #[instrument(skip(self))]
    pub async fn get(&self, id: &SubmissionId) -> ApplicationResult<SubmissionRecord> {
        self.catalog
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::from(CatalogError::SubmissionNotFound(id.clone())))
    }

    /// Statistics over the whole history
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ApplicationResult<PerformanceStats> {
        let source = self.catalog.list().await?;
        Ok(PerformanceStats::compute(&source))
    }

    /// Compare two submissions; the same id twice is rejected
    #[instrument(skip(self))]
    pub async fn compare(
        &self,
        baseline: &SubmissionId,
        selected: &SubmissionId,
    ) -> ApplicationResult<SubmissionComparison> {
        if baseline == selected {
            return Err(ApplicationError::InvalidInput(
                "Select two different submissions to compare".to_string(),
            ));
        }
        let baseline = self.get(baseline).await?;
        let selected = self.get(selected).await?;
        Ok(SubmissionComparison::new(baseline, selected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use codearena_testing::builders::{reference_time, SubmissionBuilder};
    use codearena_testing::strategies::arb_submissions;
    use proptest::prelude::*;

    fn ids(rows: &[SubmissionRecord]) -> Vec<&str> {
        rows.iter().map(|s| s.id.as_str()).collect()
    }

    fn runtimes(values: &[&str]) -> Vec<SubmissionRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, r)| {
                SubmissionBuilder::new()
                    .id(format!("s{i}"))
                    .runtime(r.parse().unwrap())
                    .build()
            })
            .collect()
    }

    #[test]
    fn test_average_runtime_excludes_not_available() {
        let stats = PerformanceStats::compute(&runtimes(&["56ms", "N/A", "68ms"]));
        assert_eq!(stats.average_runtime_ms, Some(62));
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn test_stats_on_empty_history() {
        let stats = PerformanceStats::compute(&[]);
        assert_eq!(stats.acceptance_rate, 0);
        assert_eq!(stats.average_runtime_ms, None);
        assert_eq!(stats.average_memory_mb, None);
    }

    #[test]
    fn test_acceptance_rate_rounds() {
        let source = vec![
            SubmissionBuilder::new().status(SubmissionStatus::Accepted).build(),
            SubmissionBuilder::new().status(SubmissionStatus::WrongAnswer).build(),
            SubmissionBuilder::new().status(SubmissionStatus::Accepted).build(),
        ];
        let stats = PerformanceStats::compute(&source);
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.acceptance_rate, 67);
    }

    #[test]
    fn test_runtime_sort_puts_not_available_last() {
        let source = runtimes(&["68ms", "N/A", "56ms"]);
        let mut state = SortState::new(SubmissionSort::Runtime);
        let desc = SubmissionQuery::new().sort(state).apply(&source, Utc::now());
        assert_eq!(ids(&desc), vec!["s0", "s2", "s1"]);

        state.select(SubmissionSort::Runtime);
        let asc = SubmissionQuery::new().sort(state).apply(&source, Utc::now());
        assert_eq!(ids(&asc), vec!["s2", "s0", "s1"]);
    }

    #[test]
    fn test_status_window_and_title() {
        let now = Utc.with_ymd_and_hms(2023, 11, 23, 15, 0, 0).unwrap();
        let source = vec![
            SubmissionBuilder::new()
                .id("recent")
                .title("Two Sum")
                .timestamp(Utc.with_ymd_and_hms(2023, 11, 23, 14, 20, 0).unwrap())
                .build(),
            SubmissionBuilder::new()
                .id("old")
                .title("Two Sum")
                .timestamp(Utc.with_ymd_and_hms(2023, 10, 1, 9, 0, 0).unwrap())
                .build(),
            SubmissionBuilder::new()
                .id("wrong")
                .title("LRU Cache")
                .status(SubmissionStatus::WrongAnswer)
                .timestamp(Utc.with_ymd_and_hms(2023, 11, 22, 9, 0, 0).unwrap())
                .build(),
        ];

        let week = SubmissionQuery::new().window(DateWindow::Week).apply(&source, now);
        assert_eq!(ids(&week), vec!["recent", "wrong"]);

        let accepted_two_sum = SubmissionQuery::new()
            .status(Some(SubmissionStatus::Accepted))
            .search("two sum")
            .apply(&source, now);
        assert_eq!(ids(&accepted_two_sum), vec!["recent", "old"]);
    }

    #[test]
    fn test_recent_runtimes_skip_not_available() {
        let points = recent_runtimes(&runtimes(&["56ms", "N/A", "68ms"]), RECENT_RUNTIME_POINTS);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].runtime_ms, 68.0);
        assert!(points[0].label.ends_with("..."));
    }

    #[test]
    fn test_comparison_deltas() {
        let a = SubmissionBuilder::new()
            .runtime(Measurement::Millis(58.0))
            .memory(Measurement::Megabytes(42.3))
            .build();
        let b = SubmissionBuilder::new()
            .runtime(Measurement::Millis(56.0))
            .memory(Measurement::NotAvailable)
            .build();
        let cmp = SubmissionComparison::new(a, b);
        assert_eq!(cmp.runtime_delta_ms, Some(-2.0));
        assert_eq!(cmp.memory_delta_mb, None);
    }

    proptest! {
        #[test]
        fn prop_runtime_sort_puts_not_available_last(source in arb_submissions(30), asc in any::<bool>()) {
            let direction = if asc { SortDirection::Asc } else { SortDirection::Desc };
            let query = SubmissionQuery::new()
                .sort(SortState::with_direction(SubmissionSort::Runtime, direction));
            let rows = query.apply(&source, reference_time());
            prop_assert_eq!(rows.len(), source.len());

            let measured = rows.iter().take_while(|s| s.runtime.is_available()).count();
            prop_assert!(rows[measured..].iter().all(|s| !s.runtime.is_available()));
            for pair in rows[..measured].windows(2) {
                let a = pair[0].runtime.value().unwrap_or_default();
                let b = pair[1].runtime.value().unwrap_or_default();
                let ordered = if asc { a <= b } else { a >= b };
                prop_assert!(ordered, "runtimes out of order: {} then {}", a, b);
            }
        }
    }
}
