//! Sort keys and the selected sort state.

use codearena_common::SortDirection;
use codearena_domain::Measurement;
use std::cmp::Ordering;
use std::fmt::Debug;

/// A per-screen sort key.
pub trait SortField: Copy + Eq + Debug {
    /// Direction applied when the key is newly selected. Value keys start
    /// descending; rank-like keys override this to ascending.
    fn default_direction(self) -> SortDirection {
        SortDirection::Desc
    }
}

/// A sort key that can order records of type `T`.
pub trait SortKey<T>: SortField {
    /// Ascending order for this key
    fn ascending(self, a: &T, b: &T) -> Ordering;

    /// Ordering for `direction`. The comparator is reversed, not the output.
    fn compare(self, a: &T, b: &T, direction: SortDirection) -> Ordering {
        direction.apply(self.ascending(a, b))
    }
}

/// The active sort selection of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: SortField> SortState<K> {
    /// Select `key` in its default direction
    pub fn new(key: K) -> Self {
        Self {
            key,
            direction: key.default_direction(),
        }
    }

    pub fn with_direction(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Column-header click: the same key flips direction, a different key
    /// starts at its default.
    pub fn select(&mut self, key: K) {
        if key == self.key {
            self.direction = self.direction.toggled();
        } else {
            *self = Self::new(key);
        }
    }
}

impl<K: SortField + Default> Default for SortState<K> {
    fn default() -> Self {
        Self::new(K::default())
    }
}

/// Order two measurements; `N/A` goes after every measured value in both
/// directions.
pub fn compare_measurements(a: &Measurement, b: &Measurement, direction: SortDirection) -> Ordering {
    match (a.value(), b.value()) {
        (Some(x), Some(y)) => direction.apply(x.total_cmp(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
