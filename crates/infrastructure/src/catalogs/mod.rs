//! In-memory catalog implementations.
//!
//! Each catalog implements one of the application's catalog ports over a
//! fixed record list. Lookups clone; the stored records are never handed
//! out by mutable reference.

mod community_catalog;
mod contest_catalog;
mod leaderboard_catalog;
mod problem_catalog;
mod submission_catalog;

pub use community_catalog::*;
pub use contest_catalog::*;
pub use leaderboard_catalog::*;
pub use problem_catalog::*;
pub use submission_catalog::*;

use indexmap::IndexMap;
use tracing::warn;

/// A record with a string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Insertion-ordered, read-only record store.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog<T> {
    records: IndexMap<String, T>,
}

impl<T: Keyed + Clone> InMemoryCatalog<T> {
    /// Build from records in source order. A repeated key keeps the first
    /// record.
    pub fn new(records: impl IntoIterator<Item = T>) -> Self {
        let mut map = IndexMap::new();
        for record in records {
            let key = record.key().to_string();
            if map.contains_key(&key) {
                warn!(key = %key, "Duplicate catalog key ignored");
                continue;
            }
            map.insert(key, record);
        }
        Self { records: map }
    }

    /// All records in source order
    pub fn all(&self) -> Vec<T> {
        self.records.values().cloned().collect()
    }

    pub fn find(&self, key: &str) -> Option<T> {
        self.records.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Keyed + Clone> Default for InMemoryCatalog<T> {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}
