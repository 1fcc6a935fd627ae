//! Sitecrawl: a same-host concurrent web crawler
//!
//! This crate crawls a website from a seed URL with a fixed pool of workers,
//! following only links that stay on the seed's host. Every discovered URL is
//! fetched at most once, and the run ends exactly when no worker is busy and
//! no queued URL remains.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sitecrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unusable storage root '{path}': {reason}")]
    StorageRoot { path: String, reason: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Crawler, CrawlSession};
pub use output::CrawlReport;
pub use state::VisitOutcome;
pub use crate::url::{resolve, Scope};
