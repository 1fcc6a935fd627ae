use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;

/// Upper bound on the worker pool size
pub const MAX_WORKERS: usize = 256;

/// Validates the entire configuration
///
/// Runs before any worker starts; a failure here is the only way a crawl can
/// fail as a whole.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
///
/// The storage root is only checked when persistence is requested.
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if !config.persist {
        return Ok(());
    }

    let root = config.root_path.as_ref().ok_or_else(|| ConfigError::StorageRoot {
        path: String::new(),
        reason: "persistence was requested but no root path was given".to_string(),
    })?;

    let metadata = std::fs::metadata(root).map_err(|e| ConfigError::StorageRoot {
        path: root.display().to_string(),
        reason: e.to_string(),
    })?;

    if !metadata.is_dir() {
        return Err(ConfigError::StorageRoot {
            path: root.display().to_string(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(())
}
