//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Validating crawl options before any network activity
//! - Managing the breadth-first frontier
//! - Coordinating fetching, text extraction and keyword ranking
//! - Persisting keywords and enforcing the page budget
//!
//! A crawl moves `Idle -> Running -> Done`, where `Done` is reached either
//! because the page budget is spent or because the frontier ran dry. Pages
//! that fail to fetch are skipped; storage failures end the crawl.
//!
//! Failed fetches do not count against `max_pages`. A site with many dead
//! links therefore dequeues (and marks visited) more URLs than the budget
//! suggests before the crawl stops.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::normalize_url;
use crate::keywords::extract_keywords;
use crate::storage::KeywordStore;
use crate::{CrawlerError, InputError};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use url::Url;

/// Limits and pacing for a single crawl
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlOptions {
    /// Maximum number of pages successfully fetched and processed
    pub max_pages: usize,

    /// Pause after each processed page (seconds)
    pub delay: f64,

    /// Number of keywords kept per page
    pub top_n: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        CrawlOptions::from(&CrawlerConfig::default())
    }
}

impl From<&CrawlerConfig> for CrawlOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            delay: config.delay,
            top_n: config.top_n,
        }
    }
}

impl CrawlOptions {
    /// Checks every limit, failing on the first invalid one
    pub fn validate(&self) -> Result<(), InputError> {
        if self.max_pages < 1 {
            return Err(InputError::MaxPages(self.max_pages));
        }
        if Duration::try_from_secs_f64(self.delay).is_err() {
            return Err(InputError::Delay(self.delay));
        }
        if self.top_n < 1 {
            return Err(InputError::TopN(self.top_n));
        }
        Ok(())
    }

    /// Sleep between pages; `None` for a zero or unrepresentable delay
    fn pause(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.delay)
            .ok()
            .filter(|pause| !pause.is_zero())
    }
}

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `max_pages` pages were processed
    BudgetExhausted,
    /// No URLs were left to visit
    FrontierEmpty,
}

/// Outcome of a crawl
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// Every URL dequeued and marked, including ones whose fetch failed
    pub visited: HashSet<String>,

    /// Pages successfully fetched and processed
    pub pages_processed: usize,

    /// Why the crawl stopped
    pub termination: Termination,

    /// URLs discovered but never processed
    pub frontier_remaining: usize,
}

/// Outcome of scraping a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// The page was fetched; its ranked keywords (possibly empty)
    Keywords(Vec<String>),

    /// The page could not be fetched
    FetchFailed { reason: String },
}

/// Main crawler coordinator structure
///
/// Owns the fetcher and the store for the duration of one crawl. The store is
/// closed when the crawl finishes.
pub struct Coordinator<F, S> {
    fetcher: F,
    store: S,
    options: CrawlOptions,
}

impl<F: PageFetcher, S: KeywordStore> Coordinator<F, S> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Page fetcher collaborator
    /// * `store` - Keyword store that receives every page's keywords
    /// * `options` - Page budget, delay and keywords per page
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Options are valid
    /// * `Err(CrawlerError::InvalidInput)` - An option is out of range
    pub fn new(fetcher: F, store: S, options: CrawlOptions) -> Result<Self, CrawlerError> {
        options.validate()?;
        Ok(Self {
            fetcher,
            store,
            options,
        })
    }

    /// Runs the main crawl loop
    ///
    /// This is the core crawling logic that:
    /// 1. Dequeues the oldest URL and marks it visited
    /// 2. Fetches the page, skipping it on failure
    /// 3. Ranks the keywords of its visible text and stores them
    /// 4. Enqueues unseen same-site links
    /// 5. Pauses before the next page
    ///
    /// The seed is queued in its parsed form, so `https://example.com`
    /// is visited as `https://example.com/`.
    pub async fn run(mut self, start_url: &str) -> Result<CrawlResult, CrawlerError> {
        let seed = normalize_url(start_url)?;
        let max_pages = self.options.max_pages;

        tracing::info!(
            "Starting crawl at {} (max pages: {}, delay: {}s, top {})",
            seed,
            max_pages,
            self.options.delay,
            self.options.top_n
        );

        let start_time = Instant::now();
        let mut frontier = Frontier::with_seed(seed.as_str());
        let mut pages_processed = 0;

        while pages_processed < max_pages {
            let Some(url) = frontier.pop() else {
                break;
            };

            if !frontier.mark_visited(&url) {
                tracing::trace!("Skipping already visited {}", url);
                continue;
            }

            if self.process_url(&url, &mut frontier).await? {
                pages_processed += 1;

                if let Some(pause) = self.options.pause() {
                    tokio::time::sleep(pause).await;
                }
            }
        }

        let termination = if pages_processed >= max_pages {
            Termination::BudgetExhausted
        } else {
            Termination::FrontierEmpty
        };

        self.store.close()?;

        tracing::info!(
            "Crawl finished ({:?}): {} pages processed, {} visited, {} left in frontier, {:?}",
            termination,
            pages_processed,
            frontier.visited_count(),
            frontier.pending(),
            start_time.elapsed()
        );

        let frontier_remaining = frontier.pending();
        Ok(CrawlResult {
            visited: frontier.into_visited(),
            pages_processed,
            termination,
            frontier_remaining,
        })
    }

    /// Processes a single URL
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Page fetched, keywords stored, links enqueued
    /// * `Ok(false)` - Page skipped (fetch failed or unparsable URL)
    /// * `Err(CrawlerError)` - Storage failed
    async fn process_url(&mut self, url: &str, frontier: &mut Frontier) -> Result<bool, CrawlerError> {
        let base_url = match Url::parse(url) {
            Ok(base_url) => base_url,
            Err(e) => {
                tracing::warn!("Skipping unparsable URL {}: {}", url, e);
                return Ok(false);
            }
        };

        let body = match self.fetcher.fetch(url).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                if final_url != url {
                    tracing::debug!("{} redirected to {} ({})", url, final_url, status_code);
                }
                body
            }
            FetchResult::Failure { reason } => {
                tracing::warn!("Failed to fetch {}: {}", url, reason);
                return Ok(false);
            }
        };

        let text = self.fetcher.parse_text(&body);
        let keywords = extract_keywords(&text, self.options.top_n)?;
        if !keywords.is_empty() {
            self.store.add_keywords(url, &keywords)?;
        }

        let mut enqueued = 0;
        for link in self.fetcher.extract_links(&body, &base_url) {
            if frontier.push(link) {
                enqueued += 1;
            }
        }

        tracing::debug!(
            "Processed {}: {} keywords, {} new links",
            url,
            keywords.len(),
            enqueued
        );

        Ok(true)
    }
}

/// Crawls from `start_url` and stores every page's keywords
///
/// Convenience wrapper around [`Coordinator`].
pub async fn run_crawl<F: PageFetcher, S: KeywordStore>(
    fetcher: F,
    store: S,
    start_url: &str,
    options: CrawlOptions,
) -> Result<CrawlResult, CrawlerError> {
    Coordinator::new(fetcher, store, options)?
        .run(start_url)
        .await
}

/// Fetches one page and ranks its keywords
///
/// # Arguments
///
/// * `fetcher` - Page fetcher collaborator
/// * `url` - The page to scrape
/// * `top_n` - Number of keywords to keep (must be >= 1)
///
/// # Returns
///
/// * `Ok(ScrapeOutcome::Keywords)` - Page fetched
/// * `Ok(ScrapeOutcome::FetchFailed)` - Page unreachable or non-success status
/// * `Err(CrawlerError)` - Invalid `top_n` or URL
pub async fn scrape<F: PageFetcher>(
    fetcher: &F,
    url: &str,
    top_n: usize,
) -> Result<ScrapeOutcome, CrawlerError> {
    if top_n < 1 {
        return Err(InputError::TopN(top_n).into());
    }
    let url = normalize_url(url)?;

    match fetcher.fetch(&url).await {
        FetchResult::Success { body, .. } => {
            let text = fetcher.parse_text(&body);
            Ok(ScrapeOutcome::Keywords(extract_keywords(&text, top_n)?))
        }
        FetchResult::Failure { reason } => Ok(ScrapeOutcome::FetchFailed { reason }),
    }
}
