//! Filter engine
//!
//! Dimensions combine with AND; values inside one dimension combine
//! with OR. An empty selection leaves its dimension unconstrained.

use crate::state::data::Study;
use crate::state::filters::SearchFilters;

/// Return the studies satisfying every active predicate, in input order.
///
/// An empty result is a valid outcome, never an error.
pub fn filter_studies<'a>(studies: &'a [Study], filters: &SearchFilters) -> Vec<&'a Study> {
    let query = filters.trimmed_query().map(str::to_lowercase);

    studies
        .iter()
        .filter(|study| matches_filters(study, filters, query.as_deref()))
        .collect()
}

/// `query` must already be lowercased
pub fn matches_filters(study: &Study, filters: &SearchFilters, query: Option<&str>) -> bool {
    if let Some(query) = query {
        if !matches_query(study, query) {
            return false;
        }
    }

    if !filters.categories.is_empty() && !filters.categories.contains(&study.category) {
        return false;
    }

    if !filters.years.is_empty() && !filters.years.contains(&study.year) {
        return false;
    }

    if !filters.statuses.is_empty() && !filters.statuses.contains(&study.status) {
        return false;
    }

    if !filters.tags.is_empty() && !study.tags.iter().any(|tag| filters.tags.contains(tag)) {
        return false;
    }

    if !filters.authors.is_empty()
        && !study
            .authors
            .iter()
            .any(|author| filters.authors.contains(&author.id) || filters.authors.contains(&author.name))
    {
        return false;
    }

    if !filters.regions.is_empty()
        && !study.regions.iter().any(|region| filters.regions.contains(region))
    {
        return false;
    }

    if let Some(range) = filters.date_range {
        if !range.contains(study.date_modified) {
            return false;
        }
    }

    true
}

/// Case-insensitive substring match on title, description, tags and summary.
/// `query` must already be lowercased.
pub fn matches_query(study: &Study, query: &str) -> bool {
    contains_folded(&study.title, query)
        || contains_folded(&study.description, query)
        || study.tags.iter().any(|tag| contains_folded(tag, query))
        || study
            .summary
            .as_deref()
            .is_some_and(|summary| contains_folded(summary, query))
}

pub(crate) fn contains_folded(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::catalog::fixtures::{author, day, gen_z_study, nev_study, study};
    use crate::state::data::{StudyCategory, StudyStatus};
    use crate::state::filters::DateRange;

    fn catalog() -> Vec<Study> {
        vec![nev_study(), gen_z_study()]
    }

    fn ids(studies: &[&Study]) -> Vec<String> {
        studies.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let studies = catalog();
        let mut filters = SearchFilters::new();
        filters.query = "nev".to_string();

        assert_eq!(ids(&filter_studies(&studies, &filters)), vec!["study-a"]);
    }

    #[test]
    fn test_query_matches_tags_and_summary() {
        let mut studies = catalog();
        studies[1].summary = Some("Streaming habits of TikTok natives".to_string());

        let mut filters = SearchFilters::new();
        filters.query = "YOUTH".to_string();
        assert_eq!(ids(&filter_studies(&studies, &filters)), vec!["study-b"]);

        filters.query = "tiktok".to_string();
        assert_eq!(ids(&filter_studies(&studies, &filters)), vec!["study-b"]);
    }

    #[test]
    fn test_category_filter() {
        let studies = catalog();
        let mut filters = SearchFilters::new();
        filters.toggle_category(StudyCategory::MarketTrends);

        assert_eq!(ids(&filter_studies(&studies, &filters)), vec!["study-a"]);
    }

    #[test]
    fn test_multi_value_dimension_is_or() {
        let studies = catalog();
        let mut filters = SearchFilters::new();
        filters.toggle_year(2022);
        filters.toggle_year(2023);

        assert_eq!(filter_studies(&studies, &filters).len(), 2);
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let studies = catalog();
        let mut filters = SearchFilters::new();
        filters.toggle_category(StudyCategory::MarketTrends);
        filters.toggle_year(2022);

        assert!(filter_studies(&studies, &filters).is_empty());
    }

    #[test]
    fn test_status_and_tag_filters() {
        let mut studies = catalog();
        studies[0].status = StudyStatus::Draft;

        let mut filters = SearchFilters::new();
        filters.toggle_status(StudyStatus::Completed);
        assert_eq!(ids(&filter_studies(&studies, &filters)), vec!["study-b"]);

        filters.reset();
        filters.toggle_tag("EV");
        filters.toggle_tag("unused");
        assert_eq!(ids(&filter_studies(&studies, &filters)), vec!["study-a"]);
    }

    #[test]
    fn test_author_matches_id_or_name() {
        let mut studies = catalog();
        studies[0].authors = vec![author("a-1", "Lena Hoffmann")];
        studies[1].authors = vec![author("a-2", "Sofia Rossi")];

        let mut filters = SearchFilters::new();
        filters.toggle_author("a-2");
        assert_eq!(ids(&filter_studies(&studies, &filters)), vec!["study-b"]);

        filters.reset();
        filters.toggle_author("Lena Hoffmann");
        assert_eq!(ids(&filter_studies(&studies, &filters)), vec!["study-a"]);
    }

    #[test]
    fn test_region_and_date_range() {
        let mut studies = catalog();
        studies[0].regions = vec!["Germany".to_string()];

        let mut filters = SearchFilters::new();
        filters.toggle_region("Germany");
        assert_eq!(ids(&filter_studies(&studies, &filters)), vec!["study-a"]);

        filters.reset();
        filters.date_range = Some(DateRange {
            start: day(2022, 1, 1),
            end: day(2022, 12, 31),
        });
        assert_eq!(ids(&filter_studies(&studies, &filters)), vec!["study-b"]);
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let mut filters = SearchFilters::new();
        filters.query = "anything".to_string();
        filters.toggle_category(StudyCategory::Technology);

        assert!(filter_studies(&[], &filters).is_empty());
        assert!(filter_studies(&[], &SearchFilters::new()).is_empty());
    }

    fn arb_studies() -> impl Strategy<Value = Vec<Study>> {
        let tags = vec!["EV", "youth", "brand", "web"];
        prop::collection::vec(
            (
                0usize..StudyCategory::ALL.len(),
                2020i32..2025,
                prop::sample::subsequence(tags, 0..3),
                "[a-z ]{0,12}",
            ),
            0..24,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (category, year, tags, title))| {
                    let mut s = study(&format!("s-{i}"), &title, StudyCategory::ALL[category], year);
                    s.tags = tags.into_iter().map(str::to_string).collect();
                    s
                })
                .collect()
        })
    }

    fn arb_filters() -> impl Strategy<Value = SearchFilters> {
        (
            prop::sample::subsequence(StudyCategory::ALL.to_vec(), 0..3),
            prop::collection::btree_set(2020i32..2025, 0..3),
            prop::sample::subsequence(vec!["EV", "youth", "brand"], 0..2),
            prop::sample::select(vec!["", "a", "ev", "study", " x "]),
        )
            .prop_map(|(categories, years, tags, query)| {
                let mut filters = SearchFilters::new();
                filters.categories = categories.into_iter().collect();
                filters.years = years;
                filters.tags = tags.into_iter().map(str::to_string).collect();
                filters.query = query.to_string();
                filters
            })
    }

    proptest! {
        #[test]
        fn prop_result_is_subset_without_duplicates(studies in arb_studies(), filters in arb_filters()) {
            let result = filter_studies(&studies, &filters);
            let mut seen = HashSet::new();
            for study in &result {
                prop_assert!(studies.iter().any(|s| std::ptr::eq(s, *study)));
                prop_assert!(seen.insert(study.id.clone()));
            }
        }

        #[test]
        fn prop_empty_filters_return_catalog_in_order(studies in arb_studies()) {
            let result = filter_studies(&studies, &SearchFilters::new());
            let expected: Vec<&Study> = studies.iter().collect();
            prop_assert_eq!(result, expected);
        }
    }
}
