//! State module for per-URL crawl results
//!
//! # Components
//!
//! - `VisitOutcome`: the terminal result of processing one admitted URL

mod visit;

// Re-export main types
pub use visit::VisitOutcome;
