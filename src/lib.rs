//! Keyword-Crawler: a same-site keyword indexer
//!
//! This crate crawls pages breadth-first from a seed URL, staying on the seed's
//! host, ranks the most frequent keywords of each page's visible text and keeps
//! a per-URL keyword index in SQLite.

pub mod config;
pub mod crawler;
pub mod keywords;
pub mod storage;

use thiserror::Error;

/// Main error type for Keyword-Crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Caller-supplied arguments rejected before any work starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("top_n must be at least 1, got {0}")]
    TopN(usize),

    #[error("max_pages must be at least 1, got {0}")]
    MaxPages(usize),

    #[error("delay must be a finite number of seconds >= 0, got {0}")]
    Delay(f64),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Keyword-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, scrape, CrawlOptions, CrawlResult, HttpFetcher, PageFetcher};
pub use keywords::extract_keywords;
pub use storage::{KeywordStore, SqliteKeywordStore};
