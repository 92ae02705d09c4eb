//! Pure computations over the catalog
//!
//! - `filter`   - predicate matching on search criteria
//! - `sort`     - stable multi-key ordering
//! - `views`    - featured, recent, grouped and statistical views
//! - `radar`    - trend radar placement and selection
//! - `debounce` - delay-coalescing for search input

pub mod debounce;
pub mod filter;
pub mod radar;
pub mod sort;
pub mod views;

use crate::state::data::Study;
use crate::state::filters::SearchFilters;

/// Filter, then order by the filters' sort key
pub fn search<'a>(studies: &'a [Study], filters: &SearchFilters) -> Vec<&'a Study> {
    let matched = filter::filter_studies(studies, filters);
    sort::sort_studies(
        &matched,
        filters.sort_by,
        filters.sort_order,
        filters.trimmed_query(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{gen_z_study, nev_study};
    use crate::state::filters::{SortKey, SortOrder};

    #[test]
    fn test_search_filters_then_sorts() {
        let studies = vec![nev_study(), gen_z_study()];
        let mut filters = SearchFilters::new();
        filters.sort_by = SortKey::Title;
        filters.sort_order = SortOrder::Asc;

        let titles: Vec<&str> = search(&studies, &filters)
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Gen Z Lifestyle", "NEV Study"]);

        filters.query = "nev".to_string();
        assert_eq!(search(&studies, &filters).len(), 1);
    }
}
