//! Error types shared across the application.
//!
//! Most failures here are recoverable: a missing study renders a
//! "not found" page and a broken preference store falls back to defaults.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// Preference database failure
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog feed violates one of its invariants
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("study not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
