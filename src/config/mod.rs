//! Configuration module for Sitecrawl
//!
//! This module handles loading the optional TOML configuration file, merging
//! command-line and environment overrides, normalizing the seed URL and
//! validating everything before a crawl starts.
//!
//! # Example
//!
//! ```no_run
//! use sitecrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_WORKERS,
};

// Re-export parser functions
pub use parser::{load_config, load_config_with_overrides, normalize_seed, prepare, ConfigOverrides};
pub use validation::MAX_WORKERS;
