//! Database schema definitions
//!
//! The keyword index is a single append-only table. There is deliberately no
//! primary key or uniqueness constraint: the same keyword may be recorded for
//! a URL any number of times, and rows come back in `rowid` order.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per (url, keyword) occurrence
CREATE TABLE IF NOT EXISTS keywords (
    url TEXT NOT NULL,
    keyword TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_keywords_url ON keywords(url);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
