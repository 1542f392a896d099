//! Crawler module for page fetching and keyword indexing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` seam
//! - Visible-text and same-site link extraction
//! - The breadth-first frontier
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{
    run_crawl, scrape, Coordinator, CrawlOptions, CrawlResult, ScrapeOutcome, Termination,
};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher};
pub use frontier::Frontier;
pub use parser::{extract_links, normalize_url, parse_text, same_site};

use crate::storage::KeywordStore;
use crate::CrawlerError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the options
/// 2. Seed the frontier with `start_url`
/// 3. Fetch pages breadth-first, staying on the seed's host
/// 4. Store the top keywords of every fetched page
/// 5. Close the store once the budget is spent or the frontier is empty
///
/// # Arguments
///
/// * `fetcher` - Page fetcher collaborator
/// * `store` - Keyword store, closed when the crawl returns
/// * `start_url` - Seed URL
/// * `options` - Page budget, politeness delay, keywords per page
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl finished; visited URLs and counters
/// * `Err(CrawlerError)` - Invalid input or storage failure
pub async fn crawl<F: PageFetcher, S: KeywordStore>(
    fetcher: F,
    store: S,
    start_url: &str,
    options: CrawlOptions,
) -> Result<CrawlResult, CrawlerError> {
    run_crawl(fetcher, store, start_url, options).await
}
