//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the KeywordStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{KeywordStore, StorageError, StorageResult};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite keyword store
///
/// The connection is dropped on [`KeywordStore::close`]; operations after that
/// report [`StorageError::Closed`].
pub struct SqliteKeywordStore {
    conn: Option<Connection>,
}

impl SqliteKeywordStore {
    /// Opens or creates a keyword store
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteKeywordStore)` - Successfully opened/created database
    /// * `Err(StorageError::Open)` - Path inaccessible or not a SQLite database
    pub fn open(path: &Path) -> StorageResult<Self> {
        let open_error = |source: rusqlite::Error| StorageError::Open {
            path: path.display().to_string(),
            source,
        };

        let conn = Connection::open(path).map_err(open_error)?;

        // Configure SQLite; a corrupt file fails here rather than on first use
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )
        .map_err(open_error)?;

        initialize_schema(&conn).map_err(open_error)?;

        tracing::debug!("Opened keyword store at {}", path.display());

        Ok(Self { conn: Some(conn) })
    }

    /// Creates an in-memory store (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn: Some(conn) })
    }

    /// Returns true once [`KeywordStore::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    fn conn(&self) -> StorageResult<&Connection> {
        self.conn.as_ref().ok_or(StorageError::Closed)
    }
}

impl KeywordStore for SqliteKeywordStore {
    fn add_keywords(&mut self, url: &str, keywords: &[String]) -> StorageResult<()> {
        let conn = self.conn.as_mut().ok_or(StorageError::Closed)?;

        if keywords.is_empty() {
            return Ok(());
        }

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO keywords (url, keyword) VALUES (?1, ?2)")?;
            for keyword in keywords {
                stmt.execute(params![url, keyword])?;
            }
        }
        tx.commit()?;

        Ok(())
    }

    fn get_keywords(&self, url: &str) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn()?
            .prepare("SELECT keyword FROM keywords WHERE url = ?1 ORDER BY rowid")?;

        let keywords = stmt
            .query_map(params![url], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(keywords)
    }

    fn list_urls(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn()?
            .prepare("SELECT DISTINCT url FROM keywords ORDER BY url")?;

        let urls = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(urls)
    }

    fn count_records(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM keywords", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn close(&mut self) -> StorageResult<()> {
        let conn = self.conn.take().ok_or(StorageError::Closed)?;
        conn.close().map_err(|(_, e)| StorageError::Sqlite(e))?;
        Ok(())
    }
}
