//! Crawler module for catalog harvesting
//!
//! This module contains the core harvesting logic, including:
//! - The single HTTP client and page fetching
//! - Randomized request pacing
//! - The pagination walker orchestrating list and detail extraction
//! - Checkpoint-based resumption

mod fetcher;
mod pacing;
mod walker;

pub use fetcher::{build_http_client, fetch_page};
pub use pacing::RateLimiter;
pub use walker::PaginationWalker;

use crate::config::Config;
use crate::model::RunState;
use crate::output::{find_checkpoints, load_snapshot, write_snapshot};
use crate::HarvestError;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Runs a complete harvest operation
///
/// This is the main entry point for a run. It will:
/// 1. Optionally load existing checkpoints and pick the resume page
/// 2. Build the HTTP client and walk the page range
/// 3. Deduplicate the accumulated records by detail URL
/// 4. Write the final aggregate snapshot
///
/// # Arguments
///
/// * `config` - The harvest configuration
/// * `resume` - Whether to load existing checkpoints and continue after the
///   highest page found (the default is to start from the configured page)
/// * `cancel` - Cooperative cancellation flag; an interrupted run keeps its
///   checkpoints and still writes the aggregate of what it collected
///
/// # Returns
///
/// * `Ok(())` - Harvest completed (possibly partially, if cancelled)
/// * `Err(HarvestError)` - Fatal setup failure or aggregate write failure
pub async fn harvest(
    config: Config,
    resume: bool,
    cancel: Arc<AtomicBool>,
) -> Result<(), HarvestError> {
    let output_dir = PathBuf::from(&config.output.directory);
    let aggregate_path = output_dir.join(&config.output.aggregate_file);

    let (seed, start_page) = if resume {
        load_resume_state(&output_dir, config.pages.start_page)?
    } else {
        (RunState::new(), config.pages.start_page)
    };

    if start_page > config.pages.end_page {
        tracing::info!(
            "All pages up to {} already checkpointed, nothing to fetch",
            config.pages.end_page
        );
    }

    let walker = PaginationWalker::new(config, cancel)?;
    let state = walker.run(seed, start_page).await?;

    let collected = state.len();
    let unique = state.into_unique();
    tracing::info!(
        "Collected {} records, {} unique by URL",
        collected,
        unique.len()
    );

    if unique.is_empty() {
        tracing::warn!("No records collected; check the site structure and selectors");
    }

    write_snapshot(&unique, &aggregate_path)?;
    tracing::info!("Aggregate written to {}", aggregate_path.display());

    Ok(())
}

/// Loads existing checkpoints into a seed state for resumption
///
/// Returns the seeded state and the first page still to fetch: one past the
/// highest checkpoint found, or the configured start page when the output
/// directory holds no checkpoints. Unreadable checkpoint files are skipped
/// with a warning rather than aborting the run.
fn load_resume_state(
    output_dir: &Path,
    default_start: u32,
) -> Result<(RunState, u32), HarvestError> {
    let checkpoints = find_checkpoints(output_dir)?;
    if checkpoints.is_empty() {
        tracing::info!(
            "No checkpoints found in {}, starting from page {}",
            output_dir.display(),
            default_start
        );
        return Ok((RunState::new(), default_start));
    }

    let mut state = RunState::new();
    let mut highest = default_start.saturating_sub(1);

    for (page, path) in checkpoints {
        match load_snapshot(&path) {
            Ok(records) => {
                tracing::info!(
                    "Loaded {} records from checkpoint page {}",
                    records.len(),
                    page
                );
                state.extend_page(records);
                highest = highest.max(page);
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable checkpoint {}: {}", path.display(), e);
            }
        }
    }

    let start = highest + 1;
    tracing::info!("Resuming from page {}", start);
    Ok((state, start))
}
