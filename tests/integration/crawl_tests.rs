//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use sitecrawl::config::{prepare, Config, CrawlerConfig, OutputConfig};
use sitecrawl::crawler::Crawler;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a prepared test configuration seeded at the given URL
fn create_test_config(seed: &str, workers: usize) -> Config {
    prepare(Config {
        seed: seed.to_string(),
        crawler: CrawlerConfig {
            workers,
            request_timeout_secs: 5,
            ..Default::default()
        },
        output: OutputConfig::default(),
    })
    .expect("Invalid test configuration")
}

/// Mounts an HTML page that must be fetched exactly `times` times
async fn mount_page(server: &MockServer, page: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_crawl_single_host() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <a href="/page1">Page 1</a>
            <a href="{}/page2">Page 2</a>
            <a href="/page1#comments">Page 1 comments</a>
            </body></html>"#,
            base_url
        ),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        r#"<html><body><a href="/">Home</a><a href="page2/">Page 2</a></body></html>"#.to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/page2",
        r#"<html><body>Content 2</body></html>"#.to_string(),
        1,
    )
    .await;

    let config = create_test_config(&base_url, 5);
    let report = sitecrawl::run_crawl(&config).await.expect("Crawl failed");

    // Should have visited /, /page1, /page2 and nothing else
    assert_eq!(report.visited, 3);
    assert_eq!(report.admitted, 3);
    assert_eq!(report.fetched, 3);

    // Wiremock verifies the exactly-once expectations when mock_server drops
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_other_host_never_fetched() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Same machine, different hostname: out of scope
    let other_url = other_server.uri().replace("127.0.0.1", "localhost");

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<a href="/x">x</a><a href="{}/y">y</a><a href="{}/z">z</a>"#,
            base_url, other_url
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/x", String::new(), 1).await;
    mount_page(&mock_server, "/y", String::new(), 1).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&other_server)
        .await;

    let config = create_test_config(&base_url, 3);
    let report = sitecrawl::run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.visited, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_not_found_still_terminates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/error">Error</a>"#.to_string(),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"<a href="/never">n</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Links on error pages are never followed
    Mock::given(method("GET"))
        .and(path("/never"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 2);
    let report = tokio::time::timeout(Duration::from_secs(30), sitecrawl::run_crawl(&config))
        .await
        .expect("Crawl did not terminate")
        .expect("Crawl failed");

    assert_eq!(report.visited, 3);
    assert_eq!(report.fetched, 1);
    assert_eq!(report.http_errors, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_link_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/left">L</a><a href="/right">R</a>"#.to_string(),
        1,
    )
    .await;

    // Both pages answer at the same time and discover /dup concurrently
    for page in ["/left", "/right"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!(r#"<a href="{}/dup">dup</a>"#, base_url))
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    mount_page(&mock_server, "/dup", String::new(), 1).await;

    let config = create_test_config(&base_url, 5);
    let report = sitecrawl::run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.visited, 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_request_timeout_is_terminal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/slow">slow</a>"#.to_string(),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url, 2);
    config.crawler.request_timeout_secs = 1;

    let report = sitecrawl::run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.visited, 2);
    assert_eq!(report.transport_errors, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_persisted_pages_written_to_root() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let root = tempfile::tempdir().expect("Failed to create temp dir");

    mount_page(&mock_server, "/", r#"<a href="/a">a</a>"#.to_string(), 1).await;
    mount_page(&mock_server, "/a", "<p>page a</p>".to_string(), 1).await;

    let config = prepare(Config {
        seed: base_url.clone(),
        output: OutputConfig {
            display: false,
            persist: true,
            root_path: Some(root.path().to_path_buf()),
        },
        ..Default::default()
    })
    .expect("Invalid test configuration");

    let report = Crawler::new(&config)
        .expect("Failed to create crawler")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited, 2);

    let mut stored: Vec<String> = std::fs::read_dir(root.path())
        .unwrap()
        .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    stored.sort();
    assert_eq!(stored, vec![r#"<a href="/a">a</a>"#, "<p>page a</p>"]);
}

#[tokio::test]
async fn test_unusable_storage_root_fails_before_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = prepare(Config {
        seed: mock_server.uri(),
        output: OutputConfig {
            display: false,
            persist: true,
            root_path: Some("/nonexistent/sitecrawl/root".into()),
        },
        ..Default::default()
    });

    assert!(matches!(
        result,
        Err(sitecrawl::ConfigError::StorageRoot { .. })
    ));
}
