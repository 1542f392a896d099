//! Storage module for persisting the keyword index
//!
//! This module handles all database operations for the crawler:
//! - SQLite database initialization and schema management
//! - Appending (url, keyword) records atomically
//! - Looking up keywords per URL and listing indexed URLs

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteKeywordStore;
pub use traits::{KeywordStore, StorageError, StorageResult};

use std::path::Path;

/// Opens or creates a keyword store
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteKeywordStore)` - Successfully opened store
/// * `Err(StorageError)` - Failed to open or initialize the database
pub fn open_store(path: &Path) -> StorageResult<SqliteKeywordStore> {
    SqliteKeywordStore::open(path)
}
