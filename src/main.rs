//! Keyword-Crawler main entry point
//!
//! This is the command-line interface for the Keyword-Crawler indexer.

use anyhow::Context;
use clap::{Parser, Subcommand};
use keyword_crawler::config::{load_optional_config, Config};
use keyword_crawler::crawler::{
    crawl, normalize_url, scrape, CrawlOptions, HttpFetcher, ScrapeOutcome,
};
use keyword_crawler::storage::{open_store, KeywordStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Keyword-Crawler: a same-site keyword indexer
///
/// Keyword-Crawler fetches pages, ranks the most frequent keywords of their
/// visible text and keeps a per-URL keyword index in SQLite.
#[derive(Parser, Debug)]
#[command(name = "keyword-crawler")]
#[command(version)]
#[command(about = "Extract and index keywords from web pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to TOML configuration file
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a single URL and optionally store its keywords
    Scrape {
        /// URL of the page to scrape
        url: String,

        /// Number of keywords to display [default: 10]
        #[arg(long)]
        top: Option<usize>,

        /// Path to keyword database (optional)
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },

    /// Crawl pages on the same site starting from a URL
    Crawl {
        /// URL to start crawling from
        start_url: String,

        /// Maximum pages to crawl [default: 10]
        #[arg(long)]
        max_pages: Option<usize>,

        /// Delay between requests in seconds [default: 1.0]
        #[arg(long)]
        delay: Option<f64>,

        /// Path to keyword database [default: keywords.db]
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,

        /// Number of keywords to extract per page [default: 10]
        #[arg(long)]
        top: Option<usize>,
    },

    /// List all stored URLs and their keywords
    List {
        /// Path to keyword database [default: keywords.db]
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_optional_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let (Some(path), Some(hash)) = (&cli.config, &config_hash) {
        tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        );
    }

    match cli.command {
        Command::Scrape { url, top, store } => {
            handle_scrape(&config, &url, top, store.as_deref()).await
        }
        Command::Crawl {
            start_url,
            max_pages,
            delay,
            store,
            top,
        } => handle_crawl(config, &start_url, max_pages, delay, store, top).await,
        Command::List { store } => handle_list(&config, store),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("keyword_crawler=info,warn"),
            1 => EnvFilter::new("keyword_crawler=debug,info"),
            2 => EnvFilter::new("keyword_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the database path: flag, then config file, then default
fn store_path(config: &Config, flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from(&config.store.database_path))
}

/// Handles `scrape`: one page, printed and optionally stored
async fn handle_scrape(
    config: &Config,
    url: &str,
    top: Option<usize>,
    store: Option<&Path>,
) -> anyhow::Result<()> {
    let top_n = top.unwrap_or(config.crawler.top_n);
    let fetcher = HttpFetcher::new(&config.user_agent, &config.fetcher)?;

    let keywords = match scrape(&fetcher, url, top_n).await? {
        ScrapeOutcome::Keywords(keywords) => keywords,
        ScrapeOutcome::FetchFailed { reason } => {
            println!("Failed to fetch {}: {}", url, reason);
            return Ok(());
        }
    };

    println!("Top {} keywords for {}:", top_n, url);
    if keywords.is_empty() {
        println!("<no keywords>");
    } else {
        println!("{}", keywords.join(", "));
    }

    if let Some(path) = store {
        // Same key a crawl of this URL would use
        let key = normalize_url(url)?;
        let mut store = open_store(path)?;
        store.add_keywords(&key, &keywords)?;
        store.close()?;
        println!("Keywords stored to {}", path.display());
    }

    Ok(())
}

/// Handles `crawl`: runs the coordinator against the configured store
async fn handle_crawl(
    config: Config,
    start_url: &str,
    max_pages: Option<usize>,
    delay: Option<f64>,
    store: Option<PathBuf>,
    top: Option<usize>,
) -> anyhow::Result<()> {
    let mut crawler = config.crawler.clone();
    if let Some(max_pages) = max_pages {
        crawler.max_pages = max_pages;
    }
    if let Some(delay) = delay {
        crawler.delay = delay;
    }
    if let Some(top) = top {
        crawler.top_n = top;
    }
    let options = CrawlOptions::from(&crawler);

    // Reject bad limits before touching the database or the network
    options.validate()?;

    let path = store_path(&config, store);
    let store = open_store(&path)?;
    let fetcher = HttpFetcher::new(&config.user_agent, &config.fetcher)?;

    match crawl(fetcher, store, start_url, options).await {
        Ok(result) => {
            println!("Crawled {} pages.", result.visited.len());
            println!("Stored keywords in {}.", path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles `list`: every stored URL with its keywords
fn handle_list(config: &Config, store: Option<PathBuf>) -> anyhow::Result<()> {
    let path = store_path(config, store);
    let mut store = open_store(&path)?;

    let urls = store.list_urls()?;
    if urls.is_empty() {
        println!("No keywords stored in {}", path.display());
    }

    for url in &urls {
        let keywords = store.get_keywords(url)?;
        println!("{}:", url);
        println!("  {}", keywords.join(", "));
    }

    store.close()?;
    Ok(())
}
