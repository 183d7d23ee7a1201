//! Predicate builders.
//!
//! Each builder takes an optional selection and returns a closure that
//! matches every record when the selection is absent.

use chrono::{DateTime, Local, TimeZone, Utc};
use codearena_common::{DateWindow, QueryText};
use indexmap::IndexSet;
use std::hash::Hash;

type Check<'a, T> = Box<dyn Fn(&T) -> bool + Send + Sync + 'a>;

/// A conjunction of record checks. An empty set matches everything.
pub struct Predicates<'a, T> {
    checks: Vec<Check<'a, T>>,
}

impl<'a, T> Predicates<'a, T> {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a check
    pub fn with<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'a,
    {
        self.checks.push(Box::new(check));
        self
    }

    pub fn matches(&self, record: &T) -> bool {
        self.checks.iter().all(|check| check(record))
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl<T> Default for Predicates<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Field equals the selected value.
pub fn exact<T, V, F>(selected: Option<V>, field: F) -> impl Fn(&T) -> bool + Send + Sync
where
    V: PartialEq + Send + Sync,
    F: Fn(&T) -> V + Send + Sync,
{
    move |record| selected.as_ref().map_or(true, |want| field(record) == *want)
}

/// Record carries at least one selected value.
pub fn any_of<T, V, F>(selected: IndexSet<V>, values: F) -> impl Fn(&T) -> bool + Send + Sync
where
    V: Eq + Hash + Send + Sync,
    F: Fn(&T) -> &IndexSet<V> + Send + Sync,
{
    move |record| selected.is_empty() || !values(record).is_disjoint(&selected)
}

/// Case-insensitive substring over one or more text fields.
pub fn text_search<T, F>(query: QueryText, fields: F) -> impl Fn(&T) -> bool + Send + Sync
where
    F: for<'x> Fn(&'x T) -> Vec<&'x str> + Send + Sync,
{
    move |record| query.matches(fields(record))
}

/// Timestamp within the window ending at `now`, "today" in local time.
pub fn within_window<T, F>(
    window: DateWindow,
    now: DateTime<Utc>,
    timestamp: F,
) -> impl Fn(&T) -> bool + Send + Sync
where
    F: Fn(&T) -> DateTime<Utc> + Send + Sync,
{
    within_window_in(window, now, Local, timestamp)
}

/// [`within_window`] with "today" measured in `tz`.
pub fn within_window_in<T, Tz, F>(
    window: DateWindow,
    now: DateTime<Utc>,
    tz: Tz,
    timestamp: F,
) -> impl Fn(&T) -> bool + Send + Sync
where
    Tz: TimeZone,
    F: Fn(&T) -> DateTime<Utc> + Send + Sync,
{
    let cutoff = window.cutoff_in(now, &tz);
    move |record| cutoff.map_or(true, |cutoff| timestamp(record) >= cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        kind: &'static str,
        tags: IndexSet<&'static str>,
        title: String,
        at: DateTime<Utc>,
    }

    fn item(kind: &'static str, tags: &[&'static str], title: &str, at: DateTime<Utc>) -> Item {
        Item {
            kind,
            tags: tags.iter().copied().collect(),
            title: title.to_string(),
            at,
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 11, 23, h, m, 0).unwrap()
    }

    #[test]
    fn test_absent_selection_matches_all() {
        let record = item("a", &["x"], "Two Sum", at(10, 0));
        assert!(exact(None::<&str>, |i: &Item| i.kind)(&record));
        assert!(any_of(IndexSet::new(), |i: &Item| &i.tags)(&record));
        assert!(text_search(QueryText::new("  "), |i: &Item| vec![i.title.as_str()])(&record));
        assert!(within_window(DateWindow::All, at(12, 0), |i: &Item| i.at)(&record));
    }

    #[test]
    fn test_any_of_needs_one_shared_value() {
        let record = item("a", &["x", "y"], "t", at(10, 0));
        let selected: IndexSet<&str> = ["y", "z"].into_iter().collect();
        assert!(any_of(selected, |i: &Item| &i.tags)(&record));
        let selected: IndexSet<&str> = ["z"].into_iter().collect();
        assert!(!any_of(selected, |i: &Item| &i.tags)(&record));
    }

    #[test]
    fn test_text_search_is_case_insensitive() {
        let record = item("a", &[], "Two Sum", at(10, 0));
        assert!(text_search(QueryText::new("two"), |i: &Item| vec![i.title.as_str()])(&record));
        assert!(!text_search(QueryText::new("three"), |i: &Item| vec![i.title.as_str()])(&record));
    }

    #[test]
    fn test_today_boundary_is_inclusive() {
        let check = within_window_in(DateWindow::Today, at(15, 0), Utc, |i: &Item| i.at);
        assert!(check(&item("a", &[], "t", at(0, 0))));
        let before = Utc.with_ymd_and_hms(2023, 11, 22, 23, 59, 59).unwrap();
        assert!(!check(&item("a", &[], "t", before)));
    }

    #[test]
    fn test_conjunction() {
        let record = item("a", &["x"], "Two Sum", at(10, 0));
        let both = Predicates::new()
            .with(exact(Some("a"), |i: &Item| i.kind))
            .with(text_search(QueryText::new("sum"), |i: &Item| vec![i.title.as_str()]));
        assert_eq!(both.len(), 2);
        assert!(both.matches(&record));

        let failing = both.with(exact(Some("b"), |i: &Item| i.kind));
        assert!(!failing.matches(&record));
        assert!(Predicates::<Item>::new().matches(&record));
    }
}
