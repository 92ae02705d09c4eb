//! Derived views over the catalog
//!
//! Each view is a pure function of its input and is recomputed on every
//! call. The catalog is static per session, so nothing is cached.

use std::collections::{BTreeMap, HashSet};

use crate::state::data::{Momentum, Ring, Study, StudyCategory, StudyStatus, TrendItem};
use crate::state::filters::{SortKey, SortOrder};

use super::sort::sort_studies;

/// Featured studies in catalog order
pub fn featured(studies: &[Study]) -> Vec<&Study> {
    studies.iter().filter(|study| study.is_featured).collect()
}

/// The `limit` most recently modified studies
pub fn recent(studies: &[Study], limit: usize) -> Vec<&Study> {
    let all: Vec<&Study> = studies.iter().collect();
    let mut sorted = sort_studies(&all, SortKey::Date, SortOrder::Desc, None);
    sorted.truncate(limit);
    sorted
}

/// Partition by category; each group keeps catalog order
pub fn by_category(studies: &[Study]) -> BTreeMap<StudyCategory, Vec<&Study>> {
    let mut groups: BTreeMap<StudyCategory, Vec<&Study>> = BTreeMap::new();
    for study in studies {
        groups.entry(study.category).or_default().push(study);
    }
    groups
}

/// Partition by year; each group keeps catalog order
pub fn by_year(studies: &[Study]) -> BTreeMap<i32, Vec<&Study>> {
    let mut groups: BTreeMap<i32, Vec<&Study>> = BTreeMap::new();
    for study in studies {
        groups.entry(study.year).or_default().push(study);
    }
    groups
}

/// Other studies sharing the category or at least one tag
pub fn related<'a>(studies: &'a [Study], study: &Study, limit: usize) -> Vec<&'a Study> {
    studies
        .iter()
        .filter(|other| other.id != study.id)
        .filter(|other| {
            other.category == study.category || other.tags.iter().any(|tag| study.tags.contains(tag))
        })
        .take(limit)
        .collect()
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_studies: usize,
    /// Studies in progress
    pub active_projects: usize,
    pub completed_this_year: usize,
    /// Drafts waiting for review
    pub pending_reviews: usize,
    pub total_documents: usize,
    /// Distinct author ids
    pub total_authors: usize,
}

impl DashboardStats {
    pub fn compute(studies: &[Study], current_year: i32) -> Self {
        let count = |status: StudyStatus| studies.iter().filter(|s| s.status == status).count();

        let authors: HashSet<&str> = studies
            .iter()
            .flat_map(|study| study.authors.iter().map(|author| author.id.as_str()))
            .collect();

        DashboardStats {
            total_studies: studies.len(),
            active_projects: count(StudyStatus::InProgress),
            completed_this_year: studies
                .iter()
                .filter(|s| s.status == StudyStatus::Completed && s.year == current_year)
                .count(),
            pending_reviews: count(StudyStatus::Draft),
            total_documents: studies.iter().map(|s| s.documents.len()).sum(),
            total_authors: authors.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryShare {
    pub category: StudyCategory,
    pub count: usize,
    /// 0.0 to 100.0
    pub percentage: f32,
}

/// Study count per category, largest first. Empty categories are omitted.
pub fn category_distribution(studies: &[Study]) -> Vec<CategoryShare> {
    let total = studies.len();
    let mut shares: Vec<CategoryShare> = by_category(studies)
        .into_iter()
        .map(|(category, group)| CategoryShare {
            category,
            count: group.len(),
            percentage: group.len() as f32 * 100.0 / total as f32,
        })
        .collect();
    // Stable: equal counts stay in category order
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// Study count per status, in display order
pub fn status_breakdown(studies: &[Study]) -> Vec<(StudyStatus, usize)> {
    StudyStatus::ALL
        .iter()
        .map(|&status| (status, studies.iter().filter(|s| s.status == status).count()))
        .collect()
}

/// Trend items with rising momentum
pub fn rising_trends(trends: &[TrendItem], limit: usize) -> Vec<&TrendItem> {
    trends
        .iter()
        .filter(|trend| trend.momentum == Momentum::Rising)
        .take(limit)
        .collect()
}

/// Group trend items by ring, innermost ring first. Empty rings are kept.
pub fn trends_by_ring<'a>(trends: &[&'a TrendItem]) -> Vec<(Ring, Vec<&'a TrendItem>)> {
    Ring::ALL
        .iter()
        .map(|&ring| {
            let items = trends.iter().copied().filter(|t| t.ring == ring).collect();
            (ring, items)
        })
        .collect()
}
