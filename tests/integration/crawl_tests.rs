//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end against a real SQLite file.

use keyword_crawler::config::{FetcherConfig, UserAgentConfig};
use keyword_crawler::crawler::{
    crawl, scrape, CrawlOptions, HttpFetcher, PageFetcher, ScrapeOutcome, Termination,
};
use keyword_crawler::storage::{KeywordStore, SqliteKeywordStore};
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_fetcher() -> HttpFetcher {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
    };
    HttpFetcher::new(&user_agent, &FetcherConfig { timeout_secs: 5 })
        .expect("Failed to build fetcher")
}

fn test_options(max_pages: usize) -> CrawlOptions {
    CrawlOptions {
        max_pages,
        delay: 0.0,
        top_n: 5,
    }
}

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("keywords.db")
}

async fn mount_html(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Index page links to two pages, one absolute and one relative
    mount_html(
        &mock_server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            <p>Welcome welcome welcome to the garden</p>
            <a href="{}/plants">Plants</a>
            <a href="/tools">Tools</a>
            <a href="https://elsewhere.example.org/">Elsewhere</a>
            </body></html>"#,
            base_url
        ),
    )
    .await;

    mount_html(
        &mock_server,
        "/plants",
        r#"<html><body><p>Tomatoes tomatoes basil</p><a href="/">Home</a></body></html>"#
            .to_string(),
    )
    .await;

    mount_html(
        &mock_server,
        "/tools",
        r#"<html><body><p>Shovel rake shovel</p><script>hiddenscript()</script></body></html>"#
            .to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let store = SqliteKeywordStore::open(&db_path(&dir)).expect("Failed to open store");

    let root = format!("{}/", base_url);
    let result = crawl(create_test_fetcher(), store, &root, test_options(10))
        .await
        .expect("Crawl failed");

    assert_eq!(result.pages_processed, 3);
    assert_eq!(result.visited.len(), 3);
    assert_eq!(result.termination, Termination::FrontierEmpty);

    // Verify results
    let store = SqliteKeywordStore::open(&db_path(&dir)).expect("Failed to reopen store");
    assert_eq!(
        store.list_urls().unwrap(),
        vec![
            root.clone(),
            format!("{}/plants", base_url),
            format!("{}/tools", base_url),
        ]
    );
    assert_eq!(
        store.get_keywords(&root).unwrap(),
        vec!["welcome", "home", "garden", "plants", "tools"]
    );
    assert_eq!(
        store
            .get_keywords(&format!("{}/plants", base_url))
            .unwrap(),
        vec!["tomatoes", "basil", "home"]
    );
    assert_eq!(
        store.get_keywords(&format!("{}/tools", base_url)).unwrap(),
        vec!["shovel", "rake"]
    );
}

#[tokio::test]
async fn test_page_budget_leaves_frontier_unprocessed() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/",
        r#"<html><body>seed page
            <a href="/one">One</a><a href="/two">Two</a><a href="/three">Three</a>
            </body></html>"#
            .to_string(),
    )
    .await;

    for page in ["/one", "/two", "/three"] {
        mount_html(
            &mock_server,
            page,
            "<html><body>leaf content</body></html>".to_string(),
        )
        .await;
    }

    let dir = TempDir::new().unwrap();
    let store = SqliteKeywordStore::open(&db_path(&dir)).unwrap();

    let result = crawl(
        create_test_fetcher(),
        store,
        &format!("{}/", mock_server.uri()),
        test_options(2),
    )
    .await
    .unwrap();

    assert_eq!(result.visited.len(), 2);
    assert_eq!(result.pages_processed, 2);
    assert!(result.frontier_remaining >= 1);
    assert_eq!(result.termination, Termination::BudgetExhausted);

    let store = SqliteKeywordStore::open(&db_path(&dir)).unwrap();
    assert_eq!(store.list_urls().unwrap().len(), 2);
}

#[tokio::test]
async fn test_failed_seed_stores_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SqliteKeywordStore::open(&db_path(&dir)).unwrap();
    let root = format!("{}/", mock_server.uri());

    let result = crawl(create_test_fetcher(), store, &root, test_options(3))
        .await
        .unwrap();

    assert_eq!(result.visited.len(), 1);
    assert!(result.visited.contains(&root));
    assert_eq!(result.pages_processed, 0);

    let store = SqliteKeywordStore::open(&db_path(&dir)).unwrap();
    assert_eq!(store.count_records().unwrap(), 0);
}

#[tokio::test]
async fn test_broken_links_are_skipped() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/",
        r#"<html><body>root page <a href="/missing">Missing</a><a href="/present">Present</a></body></html>"#
            .to_string(),
    )
    .await;

    mount_html(
        &mock_server,
        "/present",
        "<html><body>present page</body></html>".to_string(),
    )
    .await;

    // Anything else is a 404
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SqliteKeywordStore::open(&db_path(&dir)).unwrap();

    let result = crawl(
        create_test_fetcher(),
        store,
        &format!("{}/", mock_server.uri()),
        test_options(10),
    )
    .await
    .unwrap();

    assert_eq!(result.visited.len(), 3);
    assert_eq!(result.pages_processed, 2);

    let store = SqliteKeywordStore::open(&db_path(&dir)).unwrap();
    assert!(store
        .get_keywords(&format!("{}/missing", mock_server.uri()))
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_fetcher_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>agent</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = create_test_fetcher()
        .fetch(&format!("{}/", mock_server.uri()))
        .await;

    assert!(result.is_success());
}

#[tokio::test]
async fn test_scrape_single_page() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/article",
        r#"<html><body><h1>Compilers</h1><p>Compilers parse programs. Parsers build trees.</p>
           <style>.compilers { color: red }</style></body></html>"#
            .to_string(),
    )
    .await;

    let outcome = scrape(
        &create_test_fetcher(),
        &format!("{}/article", mock_server.uri()),
        3,
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        ScrapeOutcome::Keywords(vec![
            "compilers".to_string(),
            "parse".to_string(),
            "programs".to_string(),
        ])
    );
}

#[tokio::test]
async fn test_scrape_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let outcome = scrape(
        &create_test_fetcher(),
        &format!("{}/gone", mock_server.uri()),
        3,
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        ScrapeOutcome::FetchFailed {
            reason: "HTTP 404".to_string()
        }
    );
}
