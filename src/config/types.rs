use serde::Deserialize;
use std::path::PathBuf;

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 5;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for Sitecrawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Seed URL; normalized to an absolute `http(s)` URL before the run
    #[serde(default)]
    pub seed: String,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Timeout for a single fetch (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Treat `path` and `path/` as one URL for dedup purposes
    #[serde(rename = "slash-alias", default = "default_true")]
    pub slash_alias: bool,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            request_timeout_secs: default_timeout(),
            slash_alias: true,
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Print each visited URL
    #[serde(default)]
    pub display: bool,

    /// Store each fetched body on disk
    #[serde(default)]
    pub persist: bool,

    /// Directory that receives stored bodies
    #[serde(rename = "root-path", default)]
    pub root_path: Option<PathBuf>,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
