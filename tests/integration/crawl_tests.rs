//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use std::sync::Arc;
use std::time::{Duration, Instant};
use sumi_trace::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use sumi_trace::crawler::{Crawler, HttpFetcher};
use sumi_trace::output::{handler_for, write_to_dir, OutputFormat};
use sumi_trace::state::PageOutcome;
use sumi_trace::CrawlError;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given rate limit
fn create_test_config(requests_per_second: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_concurrent_fetches: 4,
            requests_per_second,
            request_timeout: 5,
            canonicalize_seed: false,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
        },
        output: OutputConfig::default(),
    }
}

/// Mounts an HTML page at `route`, expected to be fetched exactly once
async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Index page: same-host, cross-host, non-HTTP and non-HTML references
    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><head><title>Home</title>
            <link href="/style.css"><script src="/app.js"></script></head>
            <body>
            <a href="/page1">Page 1</a>
            <a href="{}/page2#section">Page 2</a>
            <a href="http://external.example/page">External</a>
            <a href="mailto:team@example.com">Mail</a>
            <a href="/report.pdf">Report</a>
            <img src="https://cdn.example/logo.png">
            </body></html>"#,
            base_url
        ),
    )
    .await;

    mount_page(
        &mock_server,
        "/page1",
        r#"<html><body><a href="/">Home</a><a href="page2/">Page 2</a></body></html>"#
            .to_string(),
    )
    .await;

    mount_page(
        &mock_server,
        "/page2",
        r#"<html><body><img src="/photo.jpg"><q cite="/page1">quote</q></body></html>"#
            .to_string(),
    )
    .await;

    // Never fetched: outside the extension whitelist
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::from_config(&base_url, &create_test_config(0)).unwrap();
    let result = crawler.crawl().await.unwrap();

    let page1 = format!("{}/page1", base_url);
    let page2 = format!("{}/page2", base_url);
    let report = format!("{}/report.pdf", base_url);

    assert_eq!(result.seed, base_url);
    assert_eq!(
        result.links[&base_url],
        vec![page1.clone(), page2.clone(), report.clone()]
    );
    assert_eq!(
        result.assets[&base_url],
        vec!["/style.css", "/app.js", "https://cdn.example/logo.png"]
    );
    assert_eq!(result.links[&page1], vec![base_url.clone(), page2.clone()]);
    assert_eq!(result.links[&page2], vec![page1.clone()]);
    assert_eq!(result.assets[&page2], vec!["/photo.jpg"]);

    assert_eq!(result.outcome(&report), Some(PageOutcome::Skipped));
    assert!(result.links[&report].is_empty());
    assert!(result.failed.is_empty());
    assert_eq!(result.links.len(), 4);
    assert_eq!(result.outcome("http://external.example/page"), None);
}

#[tokio::test]
async fn test_user_agent_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::from_config(&mock_server.uri(), &create_test_config(0)).unwrap();
    let result = crawler.crawl().await.unwrap();

    assert_eq!(result.outcome(&mock_server.uri()), Some(PageOutcome::Crawled));
}

#[tokio::test]
async fn test_fetch_failure_does_not_stop_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/slow">Slow</a><a href="/fast">Fast</a>"#.to_string(),
    )
    .await;

    // Responds after the fetch timeout
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/hidden">Hidden</a>"#)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/fast",
        r#"<a href="/deeper">Deeper</a>"#.to_string(),
    )
    .await;
    mount_page(&mock_server, "/deeper", "<html></html>".to_string()).await;

    let fetcher = HttpFetcher::new(
        &UserAgentConfig::default(),
        Duration::from_millis(300),
        0,
    )
    .unwrap();
    let crawler = Crawler::new(&base_url, &CrawlerConfig::default(), Arc::new(fetcher)).unwrap();
    let result = crawler.crawl().await.unwrap();

    let slow = format!("{}/slow", base_url);
    assert_eq!(result.outcome(&slow), Some(PageOutcome::Failed));
    assert!(!result.links.contains_key(&slow));
    assert!(!result.assets.contains_key(&slow));
    assert_eq!(result.outcome(&format!("{}/hidden", base_url)), None);
    assert_eq!(
        result.outcome(&format!("{}/deeper", base_url)),
        Some(PageOutcome::Crawled)
    );
}

#[tokio::test]
async fn test_error_status_page_is_processed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/gone">Gone</a>"#.to_string()).await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"<a href="/help">Help</a>"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/help", "<html></html>".to_string()).await;

    let crawler = Crawler::from_config(&base_url, &create_test_config(0)).unwrap();
    let result = crawler.crawl().await.unwrap();

    let gone = format!("{}/gone", base_url);
    assert_eq!(result.outcome(&gone), Some(PageOutcome::Crawled));
    assert_eq!(result.links[&gone], vec![format!("{}/help", base_url)]);
}

#[tokio::test]
async fn test_rate_limited_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a><a href="/4">4</a>"#
            .to_string(),
    )
    .await;
    for page in ["/1", "/2", "/3", "/4"] {
        mount_page(&mock_server, page, "<html></html>".to_string()).await;
    }

    let rps = 10;
    let crawler = Crawler::from_config(&base_url, &create_test_config(rps)).unwrap();

    let start = Instant::now();
    let result = crawler.crawl().await.unwrap();
    let elapsed = start.elapsed();

    // 5 dispatches at 10/s cannot finish in under 4 intervals
    assert_eq!(result.links.len(), 5);
    assert!(
        elapsed >= Duration::from_millis(400),
        "crawl took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_invalid_seed() {
    let result = Crawler::from_config("not-a-url", &create_test_config(0));
    assert!(matches!(result, Err(CrawlError::InvalidSeed { .. })));
}

#[tokio::test]
async fn test_crawl_and_write_outputs() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/about">About</a><img src="/logo.png">"#.to_string(),
    )
    .await;
    mount_page(&mock_server, "/about", "<html></html>".to_string()).await;

    let crawler = Crawler::from_config(&base_url, &create_test_config(0)).unwrap();
    let result = crawler.crawl().await.unwrap();

    let dir = TempDir::new().unwrap();

    let files = handler_for(OutputFormat::Json).render(&result).unwrap();
    let written = write_to_dir(dir.path(), &files).unwrap();
    assert_eq!(written, vec![dir.path().join("127.0.0.1.json")]);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&written[0]).unwrap()).unwrap();
    assert_eq!(json["links"][&base_url][0], format!("{}/about", base_url));
    assert_eq!(json["assets"][&base_url][0], "/logo.png");

    let files = handler_for(OutputFormat::Dot).render(&result).unwrap();
    let written = write_to_dir(dir.path(), &files).unwrap();
    let links_dot = std::fs::read_to_string(&written[0]).unwrap();
    assert!(links_dot.starts_with("digraph links {"));
    assert!(links_dot.contains(&format!("\"{}\" -> \"/about\";", base_url)));

    let files = handler_for(OutputFormat::Markdown).render(&result).unwrap();
    let written = write_to_dir(dir.path(), &files).unwrap();
    assert!(written[0].ends_with("127.0.0.1_summary.md"));
}
