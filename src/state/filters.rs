//! Search criteria for the study catalog
//!
//! `SearchFilters` holds everything the filter and sort engines need.
//! It starts empty, is mutated through the store's search reducer, and
//! is restored to its defaults on an explicit clear.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::data::{StudyCategory, StudyStatus};

/// Ordering applied to a result list
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Relevance,
    #[default]
    Date,
    Title,
    /// No popularity signal exists in the catalog; ordered like `Date`
    Popularity,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Relevance,
        SortKey::Date,
        SortKey::Title,
        SortKey::Popularity,
    ];
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Relevance => "Relevance",
            SortKey::Date => "Most Recent",
            SortKey::Title => "Title",
            SortKey::Popularity => "Popularity",
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Inclusive window on `date_modified`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// The `days` leading up to `now`
    pub fn trailing_days(now: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: now - Duration::days(days),
            end: now,
        }
    }

    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// All filter criteria for the catalog
///
/// Every selection set is a dimension of the filter: an empty set means
/// the dimension is not applied, a non-empty set matches any member.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SearchFilters {
    /// Free-text query, matched case-insensitively
    pub query: String,
    pub categories: BTreeSet<StudyCategory>,
    pub years: BTreeSet<i32>,
    pub statuses: BTreeSet<StudyStatus>,
    pub tags: BTreeSet<String>,
    /// Author ids or names
    pub authors: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub date_range: Option<DateRange>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl SearchFilters {
    /// Create empty filters (matches the whole catalog)
    pub fn new() -> Self {
        Self::default()
    }

    /// The query with surrounding whitespace removed, if any is left
    pub fn trimmed_query(&self) -> Option<&str> {
        let query = self.query.trim();
        (!query.is_empty()).then_some(query)
    }

    /// Check whether any selection dimension is active.
    /// The query is excluded; the search page shows it separately.
    pub fn has_active_filters(&self) -> bool {
        !self.categories.is_empty()
            || !self.years.is_empty()
            || !self.statuses.is_empty()
            || !self.tags.is_empty()
            || !self.authors.is_empty()
            || !self.regions.is_empty()
            || self.date_range.is_some()
    }

    /// Number of selected values across all dimensions (badge count)
    pub fn active_filter_count(&self) -> usize {
        self.categories.len()
            + self.years.len()
            + self.statuses.len()
            + self.tags.len()
            + self.authors.len()
            + self.regions.len()
            + usize::from(self.date_range.is_some())
    }

    /// Check if these filters match everything in their default order
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Reset all criteria to their defaults
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn toggle_category(&mut self, category: StudyCategory) {
        toggle(&mut self.categories, category);
    }

    pub fn toggle_year(&mut self, year: i32) {
        toggle(&mut self.years, year);
    }

    pub fn toggle_status(&mut self, status: StudyStatus) {
        toggle(&mut self.statuses, status);
    }

    pub fn toggle_tag(&mut self, tag: impl Into<String>) {
        toggle(&mut self.tags, tag.into());
    }

    pub fn toggle_author(&mut self, author: impl Into<String>) {
        toggle(&mut self.authors, author.into());
    }

    pub fn toggle_region(&mut self, region: impl Into<String>) {
        toggle(&mut self.regions, region.into());
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let filters = SearchFilters::default();
        assert!(filters.is_default());
        assert!(!filters.has_active_filters());
        assert_eq!(filters.sort_by, SortKey::Date);
        assert_eq!(filters.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut filters = SearchFilters::new();
        filters.toggle_category(StudyCategory::MarketTrends);
        filters.toggle_year(2023);
        assert!(filters.has_active_filters());
        assert_eq!(filters.active_filter_count(), 2);

        filters.toggle_category(StudyCategory::MarketTrends);
        assert!(filters.categories.is_empty());
        assert_eq!(filters.active_filter_count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut filters = SearchFilters::new();
        filters.query = "ev".to_string();
        filters.toggle_tag("EV");
        filters.sort_by = SortKey::Title;

        assert!(!filters.is_default());

        filters.reset();

        assert!(filters.is_default());
    }

    #[test]
    fn test_trailing_window() {
        let now = Utc::now();
        let range = DateRange::trailing_days(now, 30);
        assert_eq!(range.span_days(), 30);
        assert!(range.contains(now));
        assert!(range.contains(now - Duration::days(30)));
        assert!(!range.contains(now - Duration::days(31)));
    }

    #[test]
    fn test_whitespace_query_is_empty() {
        let mut filters = SearchFilters::new();
        filters.query = "   ".to_string();
        assert_eq!(filters.trimmed_query(), None);

        filters.query = "  nev ".to_string();
        assert_eq!(filters.trimmed_query(), Some("nev"));
    }
}
