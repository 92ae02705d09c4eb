//! Sort engine
//!
//! All orderings are stable: studies with equal keys keep their prior
//! relative order in either direction.

use std::cmp::Ordering;

use crate::state::data::Study;
use crate::state::filters::{SortKey, SortOrder};

use super::filter::contains_folded;

/// Return a newly ordered copy of `studies`.
///
/// `query` only affects `SortKey::Relevance`.
pub fn sort_studies<'a>(
    studies: &[&'a Study],
    key: SortKey,
    order: SortOrder,
    query: Option<&str>,
) -> Vec<&'a Study> {
    let mut sorted = studies.to_vec();

    match key {
        SortKey::Date | SortKey::Popularity => {
            // Descending means most recently modified first
            sorted.sort_by(|a, b| directed(a.date_modified.cmp(&b.date_modified), order));
        }
        SortKey::Title => {
            // The default (descending) order reads A→Z; flipping gives Z→A
            sorted.sort_by(|a, b| {
                directed(compare_titles(&a.title, &b.title), order.flipped())
            });
        }
        SortKey::Relevance => {
            if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
                let query = query.to_lowercase();
                sorted.sort_by_key(|study| !contains_folded(&study.title, &query));
            }
        }
    }

    sorted
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Case-folded comparison, falling back to the raw strings so that the
/// ordering stays total
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::catalog::fixtures::{day, study};
    use crate::state::data::StudyCategory;

    fn titles(studies: &[&Study]) -> Vec<String> {
        studies.iter().map(|s| s.title.clone()).collect()
    }

    fn ids(studies: &[&Study]) -> Vec<String> {
        studies.iter().map(|s| s.id.clone()).collect()
    }

    fn dated(id: &str, title: &str, month: u32) -> Study {
        let mut s = study(id, title, StudyCategory::Technology, 2024);
        s.date_modified = day(2024, month, 1);
        s
    }

    #[test]
    fn test_date_descending_is_newest_first() {
        let studies = vec![dated("a", "A", 2), dated("b", "B", 9), dated("c", "C", 5)];
        let refs: Vec<&Study> = studies.iter().collect();

        let sorted = sort_studies(&refs, SortKey::Date, SortOrder::Desc, None);
        assert_eq!(ids(&sorted), vec!["b", "c", "a"]);

        let sorted = sort_studies(&refs, SortKey::Date, SortOrder::Asc, None);
        assert_eq!(ids(&sorted), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let studies = vec![dated("a", "A", 2), dated("b", "B", 9)];
        let refs: Vec<&Study> = studies.iter().collect();

        let _ = sort_studies(&refs, SortKey::Date, SortOrder::Desc, None);
        assert_eq!(ids(&refs), vec!["a", "b"]);
    }

    #[test]
    fn test_title_ignores_case() {
        let studies = vec![dated("1", "banana", 1), dated("2", "Apple", 1), dated("3", "cherry", 1)];
        let refs: Vec<&Study> = studies.iter().collect();

        let sorted = sort_studies(&refs, SortKey::Title, SortOrder::Desc, None);
        assert_eq!(titles(&sorted), vec!["Apple", "banana", "cherry"]);

        let sorted = sort_studies(&refs, SortKey::Title, SortOrder::Asc, None);
        assert_eq!(titles(&sorted), vec!["cherry", "banana", "Apple"]);
    }

    #[test]
    fn test_equal_keys_keep_relative_order() {
        let studies = vec![
            dated("first", "Same", 3),
            dated("other", "Other", 1),
            dated("second", "Same", 3),
        ];
        let refs: Vec<&Study> = studies.iter().collect();

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let by_title = ids(&sort_studies(&refs, SortKey::Title, order, None));
            let first = by_title.iter().position(|id| id == "first").unwrap();
            let second = by_title.iter().position(|id| id == "second").unwrap();
            assert!(first < second);

            let by_date = ids(&sort_studies(&refs, SortKey::Date, order, None));
            let first = by_date.iter().position(|id| id == "first").unwrap();
            let second = by_date.iter().position(|id| id == "second").unwrap();
            assert!(first < second);
        }
    }

    #[test]
    fn test_relevance_partitions_title_matches_first() {
        let studies = vec![
            dated("1", "Brand tracker", 1),
            dated("2", "EV charging audit", 1),
            dated("3", "Dealer survey", 1),
            dated("4", "Urban EV buyers", 1),
        ];
        let refs: Vec<&Study> = studies.iter().collect();

        let sorted = sort_studies(&refs, SortKey::Relevance, SortOrder::Desc, Some("ev"));
        assert_eq!(ids(&sorted), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_relevance_without_query_preserves_order() {
        let studies = vec![dated("1", "B", 9), dated("2", "A", 1)];
        let refs: Vec<&Study> = studies.iter().collect();

        let sorted = sort_studies(&refs, SortKey::Relevance, SortOrder::Asc, None);
        assert_eq!(ids(&sorted), vec!["1", "2"]);

        let sorted = sort_studies(&refs, SortKey::Relevance, SortOrder::Asc, Some("  "));
        assert_eq!(ids(&sorted), vec!["1", "2"]);
    }

    proptest! {
        #[test]
        fn prop_date_orders_are_exact_reverses(months in prop::sample::subsequence((1u32..=12).collect::<Vec<_>>(), 0..12)) {
            let studies: Vec<Study> = months
                .iter()
                .map(|&m| dated(&format!("s-{m}"), "T", m))
                .collect();
            let refs: Vec<&Study> = studies.iter().collect();

            let desc = sort_studies(&refs, SortKey::Date, SortOrder::Desc, None);
            let mut asc = sort_studies(&refs, SortKey::Date, SortOrder::Asc, None);
            asc.reverse();
            prop_assert_eq!(desc, asc);
        }
    }
}
