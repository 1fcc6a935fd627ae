//! Fetch/extract pipeline: the unit of work for one admitted URL
//!
//! # Steps
//!
//! 1. Fetch through the transport, bounded by the request timeout; a
//!    redirect target is marked as visited so it is not fetched again
//! 2. Display the URL and store a successful body, if those sinks are enabled
//! 3. Extract hrefs from a successful body
//! 4. Resolve, scope-filter and admit every href
//! 5. Report completion, strictly after step 4
//!
//! Every run produces exactly one [`VisitOutcome`] and reports completion
//! exactly once, whatever the fetch did.

use crate::crawler::fetcher::{FetchError, FetchResponse, Transport};
use crate::crawler::parser::LinkExtractor;
use crate::crawler::session::{Admission, CrawlSession};
use crate::output::Sinks;
use crate::state::VisitOutcome;
use crate::url::resolve_in_scope;
use std::time::Duration;
use url::Url;

/// Per-URL processing shared by all workers
pub struct Pipeline<T> {
    transport: T,
    extractor: Box<dyn LinkExtractor>,
    sinks: Sinks,
    request_timeout: Duration,
}

impl<T: Transport> Pipeline<T> {
    pub fn new(
        transport: T,
        extractor: Box<dyn LinkExtractor>,
        sinks: Sinks,
        request_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            extractor,
            sinks,
            request_timeout,
        }
    }

    /// Runs the whole pipeline for one dequeued URL
    pub async fn process(&self, session: &CrawlSession, url: Url) -> VisitOutcome {
        // Dropped at the end of this function, or during unwinding
        let visit = session.visit();

        let response = self.fetch(&url).await;
        if let Ok(response) = &response {
            if response.final_url != url {
                session.claim_redirect(&response.final_url);
            }
        }
        if let Some(display) = &self.sinks.display {
            display.display(&url);
        }

        let (outcome, enqueued) = match response {
            Ok(response) if response.is_success() => {
                self.store(session, &response);
                let hrefs = self.extractor.extract_hrefs(&response.body);
                let enqueued = self.enqueue_children(session, &hrefs, &response.final_url);
                (
                    VisitOutcome::Fetched {
                        status: response.status,
                        links: hrefs.len(),
                    },
                    enqueued,
                )
            }
            Ok(response) => {
                tracing::debug!("{} returned {}", url, response.status);
                (
                    VisitOutcome::HttpError {
                        status: response.status,
                    },
                    0,
                )
            }
            Err(e) => {
                tracing::warn!("Error while fetching {}: {}", url, e);
                (
                    VisitOutcome::TransportError {
                        message: e.to_string(),
                    },
                    0,
                )
            }
        };

        session.record(&outcome, enqueued);
        tracing::debug!("Visited {}: {}", url, outcome);

        // Children are all admitted by now
        drop(visit);
        outcome
    }

    async fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        match tokio::time::timeout(self.request_timeout, self.transport.fetch(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
        }
    }

    fn store(&self, session: &CrawlSession, response: &FetchResponse) {
        let Some(store) = &self.sinks.store else {
            return;
        };

        match store.persist(&response.body, session.next_sequence()) {
            Ok(path) => tracing::trace!("Stored {} as {}", response.final_url, path.display()),
            Err(e) => tracing::warn!("Failed to store {}: {}", response.final_url, e),
        }
    }

    /// Admits every in-scope href; returns how many were new
    fn enqueue_children(&self, session: &CrawlSession, hrefs: &[String], base: &Url) -> u64 {
        let mut enqueued = 0;
        for href in hrefs {
            let Some(child) = resolve_in_scope(href, base, session.scope()) else {
                continue;
            };

            if session.admit(child) == Admission::Admitted {
                enqueued += 1;
            }
        }
        enqueued
    }
}
