//! Crawl report generation
//!
//! This module provides the end-of-run summary and its console rendering.

use crate::state::VisitOutcome;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Summary of a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Number of URLs whose processing completed
    pub visited: u64,

    /// Number of distinct URLs admitted (seed included)
    pub admitted: u64,

    /// Pages fetched with a 2xx response
    pub fetched: u64,

    /// Pages that answered with a non-2xx status
    pub http_errors: u64,

    /// Pages that could not be fetched at all
    pub transport_errors: u64,

    /// Child URLs admitted to the frontier from fetched pages
    pub links_enqueued: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Per-outcome counters shared by all workers
///
/// These are reporting only; termination never reads them.
#[derive(Debug, Default)]
pub struct OutcomeCounters {
    fetched: AtomicU64,
    http_errors: AtomicU64,
    transport_errors: AtomicU64,
    links_enqueued: AtomicU64,
}

impl OutcomeCounters {
    pub fn record(&self, outcome: &VisitOutcome) {
        let counter = match outcome {
            VisitOutcome::Fetched { .. } => &self.fetched,
            VisitOutcome::HttpError { .. } => &self.http_errors,
            VisitOutcome::TransportError { .. } => &self.transport_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_enqueued(&self, count: u64) {
        self.links_enqueued.fetch_add(count, Ordering::Relaxed);
    }

    /// Fills the outcome fields of a report
    pub fn fill(&self, report: &mut CrawlReport) {
        report.fetched = self.fetched.load(Ordering::Relaxed);
        report.http_errors = self.http_errors.load(Ordering::Relaxed);
        report.transport_errors = self.transport_errors.load(Ordering::Relaxed);
        report.links_enqueued = self.links_enqueued.load(Ordering::Relaxed);
    }
}

/// Prints the report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("Total Visited URIs: {}", report.visited);
    println!();
    println!("  Fetched:          {}", report.fetched);
    println!("  HTTP errors:      {}", report.http_errors);
    println!("  Transport errors: {}", report.transport_errors);
    println!("  Links enqueued:   {}", report.links_enqueued);
    println!("  Elapsed:          {:.2?}", report.elapsed);
}
