//! Crawler coordinator - wires one crawl run end-to-end
//!
//! This module builds the session, pipeline and worker pool from a
//! configuration, runs the pool to completion and produces the report.

use crate::config::{normalize_seed, Config};
use crate::crawler::fetcher::{HttpTransport, Transport};
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::pipeline::Pipeline;
use crate::crawler::pool::WorkerPool;
use crate::crawler::session::CrawlSession;
use crate::output::{CrawlReport, Sinks};
use crate::CrawlError;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One crawl run, ready to start
pub struct Crawler<T> {
    session: Arc<CrawlSession>,
    pipeline: Arc<Pipeline<T>>,
    pool: WorkerPool,
}

impl Crawler<HttpTransport> {
    /// Creates a crawler that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - A prepared configuration (see [`crate::config::prepare`])
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run, seed already admitted
    /// * `Err(CrawlError)` - The seed is unusable or the HTTP client failed to build
    pub fn new(config: &Config) -> Result<Self, CrawlError> {
        let timeout = Duration::from_secs(config.crawler.request_timeout_secs);
        let transport = HttpTransport::new(&config.crawler.user_agent, timeout)?;
        Self::with_transport(config, transport, Sinks::from_config(&config.output))
    }
}

impl<T: Transport> Crawler<T> {
    /// Creates a crawler over any transport
    pub fn with_transport(config: &Config, transport: T, sinks: Sinks) -> Result<Self, CrawlError> {
        Self::with_parts(config, transport, Box::new(HtmlLinkExtractor), sinks)
    }

    /// Creates a crawler from explicit collaborators
    pub fn with_parts(
        config: &Config,
        transport: T,
        extractor: Box<dyn LinkExtractor>,
        sinks: Sinks,
    ) -> Result<Self, CrawlError> {
        let seed = normalize_seed(&config.seed)?;
        let session = CrawlSession::new(seed, config.crawler.slash_alias)?;

        let pipeline = Pipeline::new(
            transport,
            extractor,
            sinks,
            Duration::from_secs(config.crawler.request_timeout_secs),
        );

        Ok(Self {
            session: Arc::new(session),
            pipeline: Arc::new(pipeline),
            pool: WorkerPool::new(config.crawler.workers),
        })
    }

    pub fn session(&self) -> &CrawlSession {
        &self.session
    }

    /// Runs the crawl until quiescence
    ///
    /// Returns once every worker has exited. The session is dropped here,
    /// after the join.
    pub async fn run(self) -> Result<CrawlReport, CrawlError> {
        tracing::info!(
            "Crawling {} (scope: {}) with {} workers",
            self.session.seed(),
            self.session.scope().host(),
            self.pool.size()
        );

        let start_time = Instant::now();
        let processed = self
            .pool
            .run(Arc::clone(&self.session), Arc::clone(&self.pipeline))
            .await;

        if !self.session.is_quiescent() || !self.session.frontier().is_closed() {
            tracing::error!(
                "Workers exited with {} URLs outstanding and {} queued",
                self.session.outstanding(),
                self.session.frontier().len()
            );
        }

        let report = self.session.report(start_time.elapsed());
        tracing::info!(
            "Crawl completed: {} pages visited ({} dequeued, {} distinct URLs seen) in {:?}",
            report.visited,
            processed,
            self.session.seen(),
            report.elapsed
        );

        Ok(report)
    }
}

/// Runs a complete crawl over HTTP
///
/// # Example
///
/// ```no_run
/// use sitecrawl::config::load_config;
/// use sitecrawl::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("crawl.toml"))?;
/// let report = run_crawl(&config).await?;
/// println!("Visited {}", report.visited);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    Crawler::new(config)?.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{prepare, CrawlerConfig};
    use crate::crawler::fetcher::{FetchError, FetchResponse};
    use dashmap::DashMap;
    use std::collections::HashMap;
    use std::future::Future;
    use url::Url;

    /// In-memory site; counts fetches per URL
    #[derive(Clone, Default)]
    struct FakeSite {
        pages: Arc<HashMap<String, (u16, String)>>,
        fetches: Arc<DashMap<String, usize>>,
        delay: Duration,
    }

    impl FakeSite {
        fn new(pages: &[(&str, u16, &str)]) -> Self {
            Self {
                pages: Arc::new(
                    pages
                        .iter()
                        .map(|(url, status, body)| (url.to_string(), (*status, body.to_string())))
                        .collect(),
                ),
                ..Default::default()
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn fetch_count(&self, url: &str) -> usize {
            self.fetches.get(url).map(|c| *c).unwrap_or(0)
        }
    }

    impl Transport for FakeSite {
        fn fetch(
            &self,
            url: &Url,
        ) -> impl Future<Output = Result<FetchResponse, FetchError>> + Send {
            *self.fetches.entry(url.to_string()).or_insert(0) += 1;
            let page = self.pages.get(url.as_str()).cloned();
            let url = url.clone();
            let delay = self.delay;

            async move {
                tokio::time::sleep(delay).await;
                match page {
                    Some((status, body)) => Ok(FetchResponse {
                        final_url: url,
                        status,
                        body,
                    }),
                    None => Err(FetchError::Connect {
                        url: url.to_string(),
                        message: "connection refused".to_string(),
                    }),
                }
            }
        }
    }

    fn create_test_config(seed: &str, workers: usize) -> Config {
        prepare(Config {
            seed: seed.to_string(),
            crawler: CrawlerConfig {
                workers,
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_crawl_stays_on_host() {
        let site = FakeSite::new(&[
            (
                "https://a.com/",
                200,
                r#"<a href="/x">x</a><a href="https://a.com/y">y</a><a href="https://other.com/z">z</a>"#,
            ),
            ("https://a.com/x", 200, r#"<a href="/">home</a>"#),
            ("https://a.com/y", 200, r#"<a href="/x/">x again</a>"#),
            ("https://other.com/z", 200, ""),
        ]);
        let config = create_test_config("https://a.com", 5);

        let crawler = Crawler::with_transport(&config, site.clone(), Sinks::none()).unwrap();
        let report = crawler.run().await.unwrap();

        assert_eq!(report.visited, 3);
        assert_eq!(report.admitted, 3);
        assert_eq!(report.fetched, 3);
        assert_eq!(site.fetch_count("https://a.com/x"), 1);
        assert_eq!(site.fetch_count("https://a.com/y"), 1);
        assert_eq!(site.fetch_count("https://a.com/x/"), 0);
        assert_eq!(site.fetch_count("https://other.com/z"), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_crawl_terminates_with_errors() {
        let site = FakeSite::new(&[
            (
                "https://a.com/",
                200,
                r#"<a href="/missing">m</a><a href="/broken">b</a><a href="/ok">ok</a>"#,
            ),
            ("https://a.com/missing", 404, "not found"),
            ("https://a.com/ok", 500, "oops"),
        ]);
        let config = create_test_config("https://a.com", 2);

        let report = Crawler::with_transport(&config, site, Sinks::none())
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.visited, 4);
        assert_eq!(report.fetched, 1);
        assert_eq!(report.http_errors, 2);
        assert_eq!(report.transport_errors, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_shared_link_fetched_once() {
        let site = FakeSite::new(&[
            ("https://a.com/", 200, r#"<a href="/p1">1</a><a href="/p2">2</a>"#),
            ("https://a.com/p1", 200, r#"<a href="https://a.com/dup">d</a>"#),
            ("https://a.com/p2", 200, r#"<a href="https://a.com/dup">d</a>"#),
            ("https://a.com/dup", 200, ""),
        ])
        .with_delay(Duration::from_millis(5));
        let config = create_test_config("https://a.com", 4);

        let report = Crawler::with_transport(&config, site.clone(), Sinks::none())
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.visited, 4);
        assert_eq!(site.fetch_count("https://a.com/dup"), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_wide_graph_visits_every_page_once() {
        // Every page links to every other page
        let urls: Vec<String> = (0..40).map(|i| format!("https://a.com/p{}", i)).collect();
        let body: String = urls
            .iter()
            .map(|u| format!(r#"<a href="{}">l</a>"#, u))
            .collect();
        let mut pages: Vec<(&str, u16, &str)> = urls
            .iter()
            .map(|u| (u.as_str(), 200, body.as_str()))
            .collect();
        pages.push(("https://a.com/", 200, body.as_str()));
        let site = FakeSite::new(&pages).with_delay(Duration::from_millis(1));
        let config = create_test_config("https://a.com", 8);

        let report = Crawler::with_transport(&config, site.clone(), Sinks::none())
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.visited, 41);
        assert_eq!(report.admitted, 41);
        for url in &urls {
            assert_eq!(site.fetch_count(url), 1, "{}", url);
        }
    }

    #[tokio::test]
    async fn test_unreachable_seed_terminates() {
        let site = FakeSite::new(&[]);
        let config = create_test_config("https://a.com", 5);

        let report = Crawler::with_transport(&config, site, Sinks::none())
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.visited, 1);
        assert_eq!(report.transport_errors, 1);
    }

    #[tokio::test]
    async fn test_seed_normalized_when_building() {
        let config = Config {
            seed: "a.com".to_string(),
            ..Default::default()
        };

        let crawler = Crawler::with_transport(&config, FakeSite::new(&[]), Sinks::none()).unwrap();
        assert_eq!(crawler.session().seed().as_str(), "https://a.com/");
    }

    #[test]
    fn test_seed_without_domain_rejected() {
        let config = Config {
            seed: "localhost".to_string(),
            ..Default::default()
        };

        let result = Crawler::with_transport(&config, FakeSite::new(&[]), Sinks::none());
        assert!(matches!(result, Err(CrawlError::Config(_))));
    }
}
