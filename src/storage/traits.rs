//! Storage traits and error types
//!
//! This module defines the trait interface for keyword stores and the
//! associated error type.

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open keyword store at {path}: {source}")]
    Open {
        path: String,
        source: rusqlite::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Keyword store is closed")]
    Closed,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Append-only association from URL to keyword occurrences
///
/// Stores never deduplicate: adding the same keyword for a URL twice records
/// it twice. Consumers that want unique keywords must dedupe themselves.
pub trait KeywordStore {
    /// Appends one record per keyword, in the order given
    ///
    /// The append is atomic: either every keyword is recorded or none is.
    /// An empty slice is a no-op.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL the keywords came from
    /// * `keywords` - The keywords to record
    fn add_keywords(&mut self, url: &str, keywords: &[String]) -> StorageResult<()>;

    /// Returns every keyword recorded for `url`, in insertion order
    ///
    /// Unknown URLs yield an empty vector.
    fn get_keywords(&self, url: &str) -> StorageResult<Vec<String>>;

    /// Returns every distinct URL with at least one keyword, sorted
    fn list_urls(&self) -> StorageResult<Vec<String>>;

    /// Counts all keyword records
    fn count_records(&self) -> StorageResult<u64>;

    /// Releases the underlying resources
    ///
    /// Every later call, including another `close`, fails with
    /// [`StorageError::Closed`].
    fn close(&mut self) -> StorageResult<()>;
}
