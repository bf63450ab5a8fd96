//! Sumi-Trace main entry point
//!
//! This is the command-line interface for the Sumi-Trace single-host crawler.

use clap::Parser;
use std::path::{Path, PathBuf};
use sumi_trace::config::{load_config_with_hash, validate, Config};
use sumi_trace::crawler::crawl;
use sumi_trace::output::{
    handler_for, print_statistics, write_to_dir, CrawlStatistics, OutputFormat,
};
use sumi_trace::url::parse_seed;
use tracing_subscriber::EnvFilter;

/// Sumi-Trace: a single-host web crawler
///
/// Sumi-Trace crawls every page reachable from a seed URL on the seed's
/// host, recording the links and assets of each page, and writes the result
/// as JSON, DOT graphs, or a markdown summary.
#[derive(Parser, Debug)]
#[command(name = "sumi-trace")]
#[command(version = "1.0.0")]
#[command(about = "A single-host web crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling
    #[arg(value_name = "SEED")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Timeout for individual fetches, in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Outgoing request rate limit in requests per second (0 = unlimited)
    #[arg(long, value_name = "RPS")]
    rate: Option<u32>,

    /// Maximum number of concurrent fetches
    #[arg(long, value_name = "N")]
    max_conn: Option<u32>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the seed and configuration without crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(timeout) = self.timeout {
            config.crawler.request_timeout = timeout;
        }
        if let Some(rate) = self.rate {
            config.crawler.requests_per_second = rate;
        }
        if let Some(max_conn) = self.max_conn {
            config.crawler.max_concurrent_fetches = max_conn;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(dir) = &self.dir {
            config.output.directory = dir.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => load(path)?,
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    cli.apply_overrides(&mut config);
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid settings: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&cli.seed, &config)?;
    } else {
        handle_crawl(&cli.seed, &config).await?;
    }

    Ok(())
}

/// Loads the configuration file and logs its hash
fn load(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_trace=info,warn"),
            1 => EnvFilter::new("sumi_trace=debug,info"),
            2 => EnvFilter::new("sumi_trace=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates the seed and shows the settings
fn handle_dry_run(seed: &str, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let url = parse_seed(seed)?;

    println!("=== Sumi-Trace Dry Run ===\n");

    println!("Seed: {}", seed);
    println!("  Host: {}", url.host_str().unwrap_or_default());

    println!("\nCrawler Configuration:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    if config.crawler.requests_per_second == 0 {
        println!("  Rate limit: none");
    } else {
        println!(
            "  Rate limit: {} requests/sec",
            config.crawler.requests_per_second
        );
    }
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Canonicalize seed: {}", config.crawler.canonicalize_seed);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Format: {}", config.output.format);
    println!("  Directory: {}", config.output.directory);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(seed: &str, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = match crawl(seed, config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let files = handler_for(config.output.format).render(&result)?;
    let written = write_to_dir(Path::new(&config.output.directory), &files)?;
    tracing::info!("Done: {} files written", written.len());

    print_statistics(&CrawlStatistics::from_result(&result));

    Ok(())
}
