//! Side-effect sink traits
//!
//! The crawl pipeline hands every visited URL and every fetched body to
//! these sinks. Both are optional and toggled independently.

use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Receives the URL of every page as it is visited
pub trait DisplaySink: Send + Sync {
    fn display(&self, url: &Url);
}

/// Stores fetched bodies
pub trait BodyStore: Send + Sync {
    /// Persists one body under the given sequence number
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Identity of the stored file
    /// * `Err(OutputError)` - The body could not be written
    fn persist(&self, body: &str, sequence: u64) -> OutputResult<PathBuf>;
}
