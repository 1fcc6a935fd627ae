//! Crawler module for the concurrent crawl engine
//!
//! This module contains the core crawling logic, including:
//! - The dedup set and frontier shared by all workers
//! - Termination detection over outstanding work
//! - HTTP fetching and HTML link extraction
//! - The per-URL pipeline and the worker pool that drives it

mod coordinator;
mod dedup;
mod fetcher;
mod frontier;
mod parser;
mod pipeline;
mod pool;
mod session;
mod termination;

pub use coordinator::{run_crawl, Crawler};
pub use dedup::DedupSet;
pub use fetcher::{build_http_client, FetchError, FetchResponse, HttpTransport, Transport};
pub use frontier::Frontier;
pub use parser::{extract_hrefs, strip_fragment, HtmlLinkExtractor, LinkExtractor};
pub use pipeline::Pipeline;
pub use pool::WorkerPool;
pub use session::{Admission, CrawlSession, VisitGuard};
pub use termination::{Completion, TerminationDetector};
