//! Output module for crawl side effects and reporting
//!
//! This module handles:
//! - Displaying visited URLs
//! - Persisting fetched bodies to a storage root
//! - Summarizing a finished crawl

mod disk;
mod display;
pub mod stats;
mod traits;

pub use disk::DiskStore;
pub use display::StdoutDisplay;
pub use stats::{print_report, CrawlReport, OutcomeCounters};
pub use traits::{BodyStore, DisplaySink, OutputError, OutputResult};

use crate::config::OutputConfig;

/// The optional side-effect sinks of a crawl
#[derive(Default)]
pub struct Sinks {
    pub display: Option<Box<dyn DisplaySink>>,
    pub store: Option<Box<dyn BodyStore>>,
}

impl Sinks {
    /// Builds the sinks requested by the output configuration
    pub fn from_config(config: &OutputConfig) -> Self {
        let mut sinks = Self::none();
        if config.display {
            sinks = sinks.with_display(StdoutDisplay);
        }
        if let (true, Some(root)) = (config.persist, &config.root_path) {
            sinks = sinks.with_store(DiskStore::new(root.clone()));
        }
        sinks
    }

    /// No display, no persistence
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_display(mut self, display: impl DisplaySink + 'static) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    pub fn with_store(mut self, store: impl BodyStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }
}
