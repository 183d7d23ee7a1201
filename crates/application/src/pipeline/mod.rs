//! Filter/sort pipeline shared by the list screens.
//!
//! A screen describes its view as a conjunction of [`Predicates`] plus one
//! [`SortState`]; [`apply`] turns a source slice into the rows to show. The
//! source is never touched and the same inputs always give the same output.

mod predicate;
mod sort;

pub use predicate::{any_of, exact, text_search, within_window, within_window_in, Predicates};
pub use sort::{compare_measurements, SortField, SortKey, SortState};

/// Matching records, cloned, in source order.
pub fn filter<T: Clone>(source: &[T], predicates: &Predicates<'_, T>) -> Vec<T> {
    source
        .iter()
        .filter(|record| predicates.matches(record))
        .cloned()
        .collect()
}

/// Filter then sort.
///
/// The sort is the standard library's stable `sort_by`, so records that
/// compare equal keep their source order in either direction.
pub fn apply<T, K>(source: &[T], predicates: &Predicates<'_, T>, sort: &SortState<K>) -> Vec<T>
where
    T: Clone,
    K: SortKey<T>,
{
    let mut rows = filter(source, predicates);
    rows.sort_by(|a, b| sort.key.compare(a, b, sort.direction));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use codearena_common::SortDirection;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: usize,
        group: u8,
        score: u32,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ByScore;

    impl SortField for ByScore {}

    impl SortKey<Row> for ByScore {
        fn ascending(self, a: &Row, b: &Row) -> Ordering {
            a.score.cmp(&b.score)
        }
    }

    fn rows(specs: &[(u8, u32)]) -> Vec<Row> {
        specs
            .iter()
            .enumerate()
            .map(|(id, &(group, score))| Row { id, group, score })
            .collect()
    }

    #[test]
    fn test_empty_result_is_empty_vec() {
        let source = rows(&[(1, 10), (2, 20)]);
        let predicates = Predicates::new().with(exact(Some(9u8), |r: &Row| r.group));
        assert!(apply(&source, &predicates, &SortState::new(ByScore)).is_empty());
    }

    #[test]
    fn test_source_untouched() {
        let source = rows(&[(1, 30), (1, 10), (1, 20)]);
        let before = source.clone();
        let out = apply(&source, &Predicates::new(), &SortState::new(ByScore));
        assert_eq!(source, before);
        assert_eq!(out.iter().map(|r| r.score).collect::<Vec<_>>(), vec![30, 20, 10]);
    }

    fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec((0u8..3, 0u32..5), 0..40).prop_map(|specs| rows(&specs))
    }

    proptest! {
        #[test]
        fn prop_ties_keep_source_order(source in arb_rows(), desc in any::<bool>()) {
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            let state = SortState::with_direction(ByScore, direction);
            let out = apply(&source, &Predicates::new(), &state);
            for pair in out.windows(2) {
                if pair[0].score == pair[1].score {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }

        #[test]
        fn prop_conjunction_is_intersection(source in arb_rows(), group in 0u8..3, min in 0u32..5) {
            let both = Predicates::new()
                .with(exact(Some(group), |r: &Row| r.group))
                .with(move |r: &Row| r.score >= min);
            let combined = filter(&source, &both);

            let by_group = filter(&source, &Predicates::new().with(exact(Some(group), |r: &Row| r.group)));
            let by_score = filter(&source, &Predicates::new().with(move |r: &Row| r.score >= min));
            let intersection: Vec<Row> = by_group.into_iter().filter(|r| by_score.contains(r)).collect();

            prop_assert_eq!(combined, intersection);
        }

        #[test]
        fn prop_apply_is_idempotent(source in arb_rows(), group in 0u8..3) {
            let predicates = Predicates::new().with(exact(Some(group), |r: &Row| r.group));
            let state = SortState::new(ByScore);
            prop_assert_eq!(apply(&source, &predicates, &state), apply(&source, &predicates, &state));
        }
    }
}
