//! Tankobon main entry point
//!
//! This is the command-line interface for the Tankobon catalog harvester.

use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tankobon::config::load_config_with_hash;
use tankobon::crawler::harvest;
use tracing_subscriber::EnvFilter;

/// Tankobon: a manga catalog metadata harvester
///
/// Tankobon walks a paginated catalog listing, visits each entry's detail
/// page, and writes the extracted metadata as JSON snapshots: one checkpoint
/// per page plus a final deduplicated aggregate.
#[derive(Parser, Debug)]
#[command(name = "tankobon")]
#[command(version)]
#[command(about = "A manga catalog metadata harvester", long_about = None)]
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

    /// Load existing page checkpoints and continue after the highest one
    #[arg(long)]
    resume: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    handle_harvest(config, cli.resume).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tankobon=info,warn"),
            1 => EnvFilter::new("tankobon=debug,info"),
            2 => EnvFilter::new("tankobon=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the harvest plan
fn handle_dry_run(config: &tankobon::config::Config, config_hash: &str) {
    println!("=== Tankobon Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Listing template: {}", config.site.list_path_template);
    println!("  Navigation segments: {:?}", config.site.nav_segments);

    println!("\nPages:");
    println!(
        "  Range: {}..={} ({} pages)",
        config.pages.start_page,
        config.pages.end_page,
        config.pages.end_page - config.pages.start_page + 1
    );

    println!("\nPacing:");
    println!(
        "  Item delay: {:.1}s - {:.1}s",
        config.pacing.item_delay_min, config.pacing.item_delay_max
    );
    println!(
        "  Page delay: {:.1}s - {:.1}s",
        config.pacing.page_delay_min, config.pacing.page_delay_max
    );

    println!("\nFetch:");
    println!("  Request timeout: {}s", config.fetch.request_timeout);
    println!("  Connect timeout: {}s", config.fetch.connect_timeout);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Aggregate: {}", config.output.aggregate_file);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
}

/// Handles the main harvest operation
async fn handle_harvest(config: tankobon::config::Config, resume: bool) -> anyhow::Result<()> {
    if resume {
        tracing::info!("Resuming from existing checkpoints if any are found");
    } else {
        tracing::info!(
            "Starting harvest of pages {}..={}",
            config.pages.start_page,
            config.pages.end_page
        );
    }

    // Ctrl-C requests a graceful stop: the walker finishes the current item,
    // keeps its checkpoints, and still writes the aggregate
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current item before stopping");
            flag.store(true, Ordering::SeqCst);
        }
    });

    match harvest(config, resume, cancel).await {
        Ok(()) => {
            tracing::info!("Harvest completed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
