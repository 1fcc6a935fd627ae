//! Crawl session: all shared state of one run
//!
//! Created once per run, shared by every worker through an `Arc`, and
//! dropped after the pool has joined. Nothing outlives a run.

use crate::crawler::dedup::DedupSet;
use crate::crawler::frontier::Frontier;
use crate::crawler::termination::{Completion, TerminationDetector};
use crate::output::{CrawlReport, OutcomeCounters};
use crate::state::VisitOutcome;
use crate::url::Scope;
use crate::UrlError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use url::Url;

/// Result of offering a URL to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First sighting; counted as outstanding work and queued
    Admitted,
    /// Already admitted earlier (directly or through its alias)
    Duplicate,
    /// The frontier was closed; nothing was queued
    Closed,
}

/// Shared state of one crawl run
#[derive(Debug)]
pub struct CrawlSession {
    seed: Url,
    scope: Scope,
    dedup: DedupSet,
    frontier: Frontier,
    detector: TerminationDetector,
    counters: OutcomeCounters,
    sequence: AtomicU64,
}

impl CrawlSession {
    /// Creates a session and admits the seed
    ///
    /// The seed's admission is counted before any worker can observe the
    /// session, so outstanding work is never zero before the first fetch.
    ///
    /// # Arguments
    ///
    /// * `seed` - The seed URL; its host becomes the crawl scope
    /// * `slash_alias` - Dedup `path` and `path/` as one URL
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSession)` - Session with the seed queued
    /// * `Err(UrlError)` - The seed has no host
    pub fn new(seed: Url, slash_alias: bool) -> Result<Self, UrlError> {
        let scope = Scope::from_seed(&seed)?;
        let session = Self {
            seed: seed.clone(),
            scope,
            dedup: DedupSet::new(slash_alias),
            frontier: Frontier::new(),
            detector: TerminationDetector::new(),
            counters: OutcomeCounters::default(),
            sequence: AtomicU64::new(0),
        };

        session.admit(seed);
        Ok(session)
    }

    /// Offers a URL for crawling
    ///
    /// # Admission Steps
    ///
    /// 1. Test-and-set in the dedup set; losers stop here
    /// 2. Count the URL as outstanding work
    /// 3. Push it to the frontier
    ///
    /// Step 2 always precedes step 3, and both happen before the discovering
    /// worker reports its own completion.
    pub fn admit(&self, url: Url) -> Admission {
        if !self.dedup.try_admit(&url) {
            tracing::trace!("Already admitted: {}", url);
            return Admission::Duplicate;
        }

        self.detector.begin();
        match self.frontier.push(url) {
            Ok(()) => Admission::Admitted,
            Err(url) => {
                tracing::error!("Frontier closed while admitting {}", url);
                self.detector.retract();
                Admission::Closed
            }
        }
    }

    /// Marks the target of a followed redirect as visited
    ///
    /// The target's body was just fetched under the URL that redirected to
    /// it, so it is neither counted nor queued. Returns false when the target
    /// is off-host or was already known.
    pub fn claim_redirect(&self, target: &Url) -> bool {
        if !self.scope.contains(target) || !self.dedup.try_admit(target) {
            return false;
        }
        tracing::debug!("Redirect target {} marked as visited", target);
        true
    }

    /// Waits for the next URL to process
    ///
    /// Returns `None` once the crawl has reached quiescence.
    pub async fn next_url(&self) -> Option<Url> {
        self.frontier.pop().await
    }

    /// Starts processing one dequeued URL
    ///
    /// The returned guard reports completion when dropped, including when
    /// the pipeline unwinds.
    pub fn visit(&self) -> VisitGuard<'_> {
        VisitGuard { session: self }
    }

    fn complete(&self) {
        if self.detector.complete() == Completion::Quiescent {
            tracing::info!(
                "Crawl quiescent after {} visits, closing frontier",
                self.detector.completed()
            );
            self.frontier.close();
        }
    }

    /// Records the outcome of a visit for the final report
    pub fn record(&self, outcome: &VisitOutcome, enqueued: u64) {
        self.counters.record(outcome);
        self.counters.record_enqueued(enqueued);
    }

    /// Unique sequence number for a stored body
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Distinct URL identities seen, including claimed redirect targets
    pub fn seen(&self) -> usize {
        self.dedup.len()
    }

    /// URLs admitted but not yet fully processed
    pub fn outstanding(&self) -> usize {
        self.detector.outstanding()
    }

    pub fn is_quiescent(&self) -> bool {
        self.detector.is_quiescent()
    }

    /// Builds the report for this run
    pub fn report(&self, elapsed: Duration) -> CrawlReport {
        let mut report = CrawlReport {
            visited: self
                .detector
                .final_visited()
                .unwrap_or_else(|| self.detector.completed()),
            admitted: self.detector.admitted(),
            elapsed,
            ..Default::default()
        };
        self.counters.fill(&mut report);
        report
    }
}

/// Reports pipeline completion for one URL when dropped
#[must_use = "completion is reported when the guard is dropped"]
pub struct VisitGuard<'a> {
    session: &'a CrawlSession,
}

impl Drop for VisitGuard<'_> {
    fn drop(&mut self) {
        self.session.complete();
    }
}
