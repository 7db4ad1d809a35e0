//! Tidepool main entry point
//!
//! Command-line interface for the Tidepool single-site crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tidepool::config::{load_config_with_hash, Config};
use tidepool::crawler::crawl;
use tidepool::CrawlSession;
use tracing_subscriber::EnvFilter;

/// Tidepool: a bounded, polite, single-site crawler
///
/// Tidepool mirrors one website: starting from a seed address it follows
/// same-origin links, fetches pages with retry and backoff, and saves the
/// raw content locally. It respects the site's robots.txt root block and
/// paces itself with a fixed delay between requests.
#[derive(Parser, Debug)]
#[command(name = "tidepool")]
#[command(version = "0.2.0")]
#[command(about = "A bounded, polite, single-site crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    // A denied exclusion check surfaces here as an error and a nonzero exit
    let session = CrawlSession::new(config)?;
    let summary = crawl(&session).await?;

    println!(
        "Scraped {} page(s) ({} attempted, {}) -> saved in '{}'",
        summary.pages_scraped,
        summary.pages_attempted,
        summary.outcome,
        session.config().output.directory
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tidepool=info,warn"),
            1 => EnvFilter::new("tidepool=debug,info"),
            2 => EnvFilter::new("tidepool=trace,debug"),
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

/// Handles --dry-run: shows the validated configuration and exits
fn print_dry_run(config: &Config) {
    println!("=== Tidepool Dry Run ===\n");

    println!("Site:");
    println!("  Seed: {}", config.site.seed);

    println!("\nCrawler:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Request delay: {}s", config.crawler.request_delay_secs);
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Backoff base: {}", config.crawler.backoff_base);
    println!(
        "  Robots check: {}",
        if config.crawler.ignore_robots {
            "DISABLED (ignore-robots = true)"
        } else {
            "enabled"
        }
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {}", config.site.seed);
}
