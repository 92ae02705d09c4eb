//! Session preferences
//!
//! A small key-value capability for UI preferences (sidebar state, view
//! mode, theme). Values are stored as JSON text. Storage failures never
//! reach the caller: reads fall back to the given default and writes
//! are logged and dropped.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Keys of the persisted preferences
pub mod keys {
    pub const SIDEBAR_COLLAPSED: &str = "ui.sidebar_collapsed";
    pub const VIEW_MODE: &str = "ui.view_mode";
    pub const THEME: &str = "ui.theme";
}

/// Raw string storage behind `Preferences`
pub trait KeyValueStore {
    fn get(&mut self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// SQLite-backed store.
/// The database file lives in the user's data directory:
/// - Linux: ~/.local/share/research-library/preferences.db
/// - macOS: ~/Library/Application Support/research-library/preferences.db
/// - Windows: %APPDATA%\research-library\preferences.db
pub struct SqliteStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "📁 Preferences database opened");

        let store = SqliteStore {
            conn,
            db_path: Some(path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// A throwaway database that lives as long as the store
    pub fn in_memory() -> Result<Self> {
        let store = SqliteStore {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Where the database is stored when no override is configured
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("research-library");
        path.push("preferences.db");
        Some(path)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL,
                updated_at      INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1", [key])?;
        Ok(())
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}

/// Session-only store, used when the database cannot be opened
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Typed, failure-tolerant access to a `KeyValueStore`
pub struct Preferences {
    store: Box<dyn KeyValueStore>,
}

impl Preferences {
    pub fn with_store(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Open the SQLite store at `path` (or the default location).
    /// Falls back to a session-only store if that fails.
    pub fn open(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).or_else(SqliteStore::default_path);

        let opened = match path {
            Some(path) => SqliteStore::open(&path),
            None => SqliteStore::in_memory(),
        };

        match opened {
            Ok(store) => Self::with_store(store),
            Err(err) => {
                tracing::warn!(error = %err, "⚠️  Preferences unavailable, using session-only store");
                Self::with_store(MemoryStore::default())
            }
        }
    }

    /// Read `key`, or `default` if it is missing, unreadable or malformed
    pub fn get<T: DeserializeOwned>(&mut self, key: &str, default: T) -> T {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(err) => {
                tracing::warn!(key, error = %err, "Failed to read preference");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "Ignoring malformed preference");
                default
            }
        }
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(Into::into)
            .and_then(|raw| self.store.set(key, &raw));

        if let Err(err) = result {
            tracing::warn!(key, error = %err, "Failed to save preference");
        }
    }

    pub fn remove(&mut self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            tracing::warn!(key, error = %err, "Failed to remove preference");
        }
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}
