//! State management module
//!
//! This module handles all application state, including:
//! - Catalog records (data.rs)
//! - Search criteria (filters.rs)
//! - The central store and its reducers (store.rs)
//! - Persisted preferences (prefs.rs)

pub mod data;
pub mod filters;
pub mod prefs;
pub mod store;
