use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};
use url::Url;

/// Values supplied on the command line or through the environment
///
/// Each field, when present, replaces the value from the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub seed: Option<String>,
    pub workers: Option<usize>,
    pub display: Option<bool>,
    pub persist: Option<bool>,
    pub root_path: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Writes every present override into the configuration
    pub fn apply(self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(workers) = self.workers {
            config.crawler.workers = workers;
        }
        if let Some(display) = self.display {
            config.output.display = display;
        }
        if let Some(persist) = self.persist {
            config.output.persist = persist;
        }
        if let Some(root_path) = self.root_path {
            config.output.root_path = Some(root_path);
        }
    }
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded, seed-normalized and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitecrawl::config::load_config;
///
/// let config = load_config(Path::new("crawl.toml")).unwrap();
/// println!("Workers: {}", config.crawler.workers);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_overrides(Some(path), ConfigOverrides::default())
}

/// Builds the run configuration from an optional file plus overrides
///
/// Without a file, defaults are used; the overrides must then at least name
/// a seed.
pub fn load_config_with_overrides(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => Config::default(),
    };

    overrides.apply(&mut config);
    prepare(config)
}

/// Normalizes the seed and validates the configuration
pub fn prepare(mut config: Config) -> Result<Config, ConfigError> {
    config.seed = normalize_seed(&config.seed)?.to_string();
    validate(&config)?;
    Ok(config)
}

/// Normalizes a user-supplied seed URL
///
/// # Normalization Steps
///
/// 1. Reject an empty seed
/// 2. Prepend `https://` when the seed does not start with `http`
/// 3. Reject a seed without a top-level domain (no `.` in the host)
/// 4. Parse; the result must carry a host
///
/// # Examples
///
/// ```
/// use sitecrawl::config::normalize_seed;
///
/// let seed = normalize_seed("example.com").unwrap();
/// assert_eq!(seed.as_str(), "https://example.com/");
/// ```
pub fn normalize_seed(seed: &str) -> Result<Url, ConfigError> {
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(ConfigError::Validation(
            "a seed URL is required (argument, CRAWL_URL or `seed` in the config file)"
                .to_string(),
        ));
    }

    let with_scheme = if seed.starts_with("http") {
        seed.to_string()
    } else {
        format!("https://{}", seed)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    let host = url
        .host_str()
        .ok_or_else(|| ConfigError::InvalidUrl(format!("Seed URL '{}' has no host", seed)))?;

    if !host.contains('.') {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no top-level domain",
            seed
        )));
    }

    Ok(url)
}
