//! Application configuration
//!
//! Read from `<config dir>/research-library/config.toml`. Every field has
//! a default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::engine::radar::Jitter;
use crate::error::{LibraryError, Result};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub views: ViewsConfig,
    pub radar: RadarConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a typed query is applied
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    pub recent_limit: usize,
    pub related_limit: usize,
    pub rising_limit: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            recent_limit: 6,
            related_limit: 3,
            rising_limit: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Reproducible placement; set to false for a fresh scatter per render
    pub seeded: bool,
    pub seed: u64,
    /// Canvas edge length in logical pixels
    pub size: f32,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            seeded: true,
            seed: 0,
            size: 500.0,
        }
    }
}

impl RadarConfig {
    pub fn jitter(&self) -> Jitter {
        if self.seeded {
            Jitter::Seeded(self.seed)
        } else {
            Jitter::Unseeded
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Preferences database; the platform data directory when unset
    pub database: Option<PathBuf>,
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("research-library");
        path.push("config.toml");
        Some(path)
    }

    /// Load from the default location; a missing file yields the defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = Self::parse(&raw).map_err(|source| LibraryError::Config {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), "⚙️  Config loaded");
        Ok(config)
    }

    fn parse(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
