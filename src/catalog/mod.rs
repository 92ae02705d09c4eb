//! The study catalog
//!
//! The catalog is a static feed of studies and trend items embedded in
//! the binary. It is parsed and validated once at startup and never
//! mutated afterwards.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{LibraryError, Result};
use crate::state::data::{Study, TrendItem};

#[cfg(test)]
pub mod fixtures;

/// Embedded catalog feed
const BUILTIN_FEED: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub studies: Vec<Study>,
    #[serde(default)]
    pub trends: Vec<TrendItem>,
}

impl Catalog {
    /// Build a catalog from already-parsed records, checking its invariants
    pub fn new(studies: Vec<Study>, trends: Vec<TrendItem>) -> Result<Self> {
        let catalog = Catalog { studies, trends };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the catalog that ships with the application
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_FEED)
    }

    /// Parse and validate a JSON feed with `studies` and `trends` arrays
    pub fn from_json(json: &str) -> Result<Self> {
        let Catalog { studies, trends } = serde_json::from_str(json)?;
        let catalog = Self::new(studies, trends)?;

        tracing::info!(
            studies = catalog.studies.len(),
            trends = catalog.trends.len(),
            "📚 Catalog loaded"
        );

        Ok(catalog)
    }

    /// Check id uniqueness and timestamp ordering
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.studies.len());
        for study in &self.studies {
            if !seen.insert(study.id.as_str()) {
                return Err(LibraryError::InvalidCatalog(format!(
                    "duplicate study id '{}'",
                    study.id
                )));
            }
            if study.date_modified < study.date_created {
                return Err(LibraryError::InvalidCatalog(format!(
                    "study '{}' was modified before it was created",
                    study.id
                )));
            }
        }

        let mut seen = HashSet::with_capacity(self.trends.len());
        for trend in &self.trends {
            if !seen.insert(trend.id.as_str()) {
                return Err(LibraryError::InvalidCatalog(format!(
                    "duplicate trend id '{}'",
                    trend.id
                )));
            }
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.studies.is_empty()
    }

    /// Look up a study by id
    pub fn study(&self, id: &str) -> Option<&Study> {
        self.studies.iter().find(|study| study.id == id)
    }

    /// Like `study`, for callers that propagate the miss
    pub fn require_study(&self, id: &str) -> Result<&Study> {
        self.study(id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))
    }

    pub fn trend(&self, id: &str) -> Option<&TrendItem> {
        self.trends.iter().find(|trend| trend.id == id)
    }

    /// Every distinct tag, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .studies
            .iter()
            .flat_map(|study| study.tags.iter().map(String::as_str))
            .collect();
        tags.sort_unstable();
        tags.dedup();
        tags
    }

    /// Every year present in the catalog, newest first
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.studies.iter().map(|study| study.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }
}
