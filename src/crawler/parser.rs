//! HTML parser for extracting visible text and same-site links
//!
//! This module handles parsing HTML content to extract:
//! - The visible text of a page (script, style and noscript content removed)
//! - Links to follow on the same host and port as the page

use scraper::{Html, Node, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Elements whose text never counts as visible
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Schemes that never lead to a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Extracts the visible text of an HTML document
///
/// Text inside `<script>`, `<style>` and `<noscript>` is dropped. Remaining
/// text nodes are joined with spaces, every whitespace run is collapsed to a
/// single space, and the result is trimmed.
///
/// # Example
///
/// ```
/// use keyword_crawler::crawler::parse_text;
///
/// let html = "<html><body><p>Hello</p><script>var x;</script><p>world</p></body></html>";
/// assert_eq!(parse_text(html), "Hello world");
/// ```
pub fn parse_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut pieces: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });

        if !hidden {
            pieces.push(text);
        }
    }

    pieces
        .iter()
        .flat_map(|piece| piece.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts absolute links from an HTML document
///
/// # Link Extraction Rules
///
/// - Every `<a href="...">` is resolved against `base_url`
/// - `javascript:`, `mailto:`, `tel:` and `data:` hrefs are skipped
/// - Only `http`/`https` URLs on the same host and port as `base_url` are kept
///   (an explicit port equal to the scheme default counts as the same port)
/// - Fragment identifiers are removed, so `#section` links resolve to the
///   page itself
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL of the page, used to resolve relative links
///
/// # Returns
///
/// The set of matching absolute URLs, sorted
///
/// # Example
///
/// ```
/// use keyword_crawler::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/about#team">About</a><a href="https://other.com/">Other</a>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links.into_iter().collect::<Vec<_>>(), vec!["https://example.com/about"]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let mut links = BTreeSet::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_link(href, base_url) {
                links.insert(absolute_url);
            }
        }
    }

    links
}

/// Resolves a link href to an absolute same-site URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel:, data: schemes
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
/// - URLs on another host or port
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;

    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    if !same_site(&absolute_url, base_url) {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url.to_string())
}

/// Parses `url` and returns the form pages are keyed by in the store
///
/// `https://example.com` becomes `https://example.com/`.
pub fn normalize_url(url: &str) -> Result<String, url::ParseError> {
    Ok(Url::parse(url)?.to_string())
}

/// Returns true if both URLs share host and (effective) port
pub fn same_site(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    fn links(html: &str) -> Vec<String> {
        extract_links(html, &base_url()).into_iter().collect()
    }

    #[test]
    fn test_text_strips_script_style_noscript() {
        let html = r#"<html><head><title>Title</title><style>p { color: red; }</style></head>
            <body><p>Visible</p><script>alert('hidden')</script>
            <noscript>Enable JavaScript</noscript><div>Also visible</div></body></html>"#;
        assert_eq!(parse_text(html), "Title Visible Also visible");
    }

    #[test]
    fn test_text_collapses_whitespace() {
        let html = "<html><body><p>  one\n\n two\t</p>   <p>three  </p></body></html>";
        assert_eq!(parse_text(html), "one two three");
    }

    #[test]
    fn test_text_nested_hidden_content() {
        let html = "<body><script>var x = 1;</script><div><style>b{}</style>kept</div></body>";
        assert_eq!(parse_text(html), "kept");
    }

    #[test]
    fn test_text_of_empty_document() {
        assert_eq!(parse_text(""), "");
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/other"]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let html = r#"<html><body><a href="other">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/other"]);
    }

    #[test]
    fn test_skip_other_host() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_subdomain() {
        let html = r#"<html><body><a href="https://blog.example.com/">Blog</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_other_port() {
        let html = r#"<html><body><a href="https://example.com:8443/">Alt</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_explicit_default_port_is_same_site() {
        let html = r#"<html><body><a href="https://example.com:443/x">X</a></body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/x"]);
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"<html><body>
            <a href="javascript:void(0)">JS</a>
            <a href="JavaScript:alert(1)">JS upper</a>
            <a href="mailto:test@example.com">Email</a>
            <a href="tel:+1234567890">Call</a>
            <a href="data:text/html,<h1>Test</h1>">Data</a>
            <a href="ftp://example.com/file">FTP</a>
            </body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_fragment_removed() {
        let html = r##"<html><body><a href="/docs#install">Docs</a></body></html>"##;
        assert_eq!(links(html), vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_fragment_only_resolves_to_self() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        assert_eq!(links(html), vec!["https://example.com/page"]);
    }

    #[test]
    fn test_duplicate_links_collapse() {
        let html = r#"<html><body>
            <a href="/a">A</a><a href="/a#top">A again</a><a href="https://example.com/a">A abs</a>
            </body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_mixed_valid_and_invalid_links() {
        let html = r#"
            <html>
            <body>
                <a href="/valid">Valid</a>
                <a href="javascript:alert('no')">Invalid</a>
                <a href="mailto:test@example.com">Invalid</a>
                <a href="/another-valid">Valid</a>
                <a href="https://other.com/page3">Other site</a>
            </body>
            </html>
        "#;
        assert_eq!(
            links(html),
            vec!["https://example.com/another-valid", "https://example.com/valid"]
        );
    }

    #[test]
    fn test_same_site() {
        let a = Url::parse("http://example.com/").unwrap();
        let b = Url::parse("http://example.com:80/x").unwrap();
        let c = Url::parse("https://example.com/").unwrap();
        assert!(same_site(&a, &b));
        assert!(!same_site(&a, &c));
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("https://example.com").unwrap(), "https://example.com/");
        assert_eq!(
            normalize_url("HTTPS://Example.com:443/a b").unwrap(),
            "https://example.com/a%20b"
        );
        assert!(normalize_url("not a url").is_err());
    }
}
