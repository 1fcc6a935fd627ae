//! Sitecrawl main entry point
//!
//! This is the command-line interface for the Sitecrawl same-host crawler.

use anyhow::Context;
use clap::builder::BoolishValueParser;
use clap::Parser;
use sitecrawl::config::{load_config_with_overrides, ConfigOverrides};
use sitecrawl::crawler::run_crawl;
use sitecrawl::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitecrawl: crawl every page of one host
///
/// Starting from the seed URL, Sitecrawl follows every link that stays on the
/// seed's host, fetching each page exactly once with a fixed pool of workers,
/// and prints the number of visited pages when nothing is left to fetch.
#[derive(Parser, Debug)]
#[command(name = "sitecrawl")]
#[command(version)]
#[command(about = "A concurrent same-host web crawler", long_about = None)]
struct Cli {
    /// Seed URL; `https://` is assumed when no scheme is given
    #[arg(value_name = "URL", env = "CRAWL_URL")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of concurrent workers [default: 5]
    #[arg(short, long, env = "THREAD_COUNT")]
    workers: Option<usize>,

    /// Print each visited URL
    #[arg(
        long,
        env = "DISPLAY_URI",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    display: Option<bool>,

    /// Store each fetched page under the root path
    #[arg(
        long,
        env = "STORE_ON_DISK",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    store: Option<bool>,

    /// Directory receiving stored pages (required with --store)
    #[arg(long, value_name = "DIR", env = "ROOT_PATH")]
    root_path: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            seed: self.url.clone(),
            workers: self.workers,
            display: self.display,
            persist: self.store,
            root_path: self.root_path.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Configuration problems are fatal before any worker starts
    let config = load_config_with_overrides(cli.config.as_deref(), cli.overrides())
        .context("Failed to load configuration")?;

    tracing::info!(
        "Seed: {}, workers: {}, display: {}, persist: {}",
        config.seed,
        config.crawler.workers,
        config.output.display,
        config.output.persist
    );

    let report = run_crawl(&config).await.context("Crawl failed")?;
    print_report(&report);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitecrawl=info,warn"),
            1 => EnvFilter::new("sitecrawl=debug,info"),
            2 => EnvFilter::new("sitecrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
