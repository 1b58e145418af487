//! Pagination walker - main harvest orchestration logic
//!
//! This module drives the list → detail pipeline across the configured page
//! range, one request at a time:
//! - Fetch one catalog page and extract entry stubs
//! - Filter out navigation links
//! - Fetch and extract every entry's detail page, paced by the rate limiter
//! - Write the page checkpoint and move on
//!
//! Every failure below the walker is contained: a failed listing fetch
//! becomes an empty page, a failed detail fetch becomes a stub-only record,
//! a failed checkpoint write is logged and in-memory state keeps growing.
//! Only failing to construct the HTTP client aborts a run.
//!
//! A checkpoint on disk means its page completed. Pages whose listing fetch
//! failed, and pages cut short by cancellation, are never checkpointed, so
//! a resumed run fetches them again instead of silently skipping them.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::pacing::RateLimiter;
use crate::extract::{extract_details, extract_list, filter_navigation};
use crate::model::{MangaRecord, RunState};
use crate::output::{checkpoint_path, write_snapshot};
use crate::HarvestError;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// One page's extraction outcome
///
/// `complete` is false when the listing fetch failed or cancellation cut
/// the item loop short; such a page keeps its records in memory but must
/// not be checkpointed, since a checkpoint marks the page as done.
struct PageOutcome {
    records: Vec<MangaRecord>,
    complete: bool,
}

/// Walks the catalog page range and accumulates extracted records
pub struct PaginationWalker {
    config: Config,
    client: Client,
    limiter: RateLimiter,
    base_url: Url,
    output_dir: PathBuf,
    cancel: Arc<AtomicBool>,
}

impl PaginationWalker {
    /// Creates a walker, acquiring the HTTP client for the whole run
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration
    /// * `cancel` - Cooperative cancellation flag, checked between pages
    ///   and between items
    ///
    /// # Returns
    ///
    /// * `Ok(PaginationWalker)` - Ready to run
    /// * `Err(HarvestError)` - Client construction or base URL failure; fatal
    pub fn new(config: Config, cancel: Arc<AtomicBool>) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.fetch)?;
        let base_url = Url::parse(&config.site.base_url)?;
        let limiter = RateLimiter::new(&config.pacing);
        let output_dir = PathBuf::from(&config.output.directory);

        Ok(Self {
            config,
            client,
            limiter,
            base_url,
            output_dir,
            cancel,
        })
    }

    /// Runs the walk from `start_page` through the configured end page
    ///
    /// Pages are processed strictly in ascending order and items strictly in
    /// catalog order; each completed page is checkpointed before the next
    /// one starts. On cancellation the walker stops at the next check and
    /// returns everything collected so far, leaving checkpoints on disk.
    ///
    /// # Arguments
    ///
    /// * `seed` - Records carried in from loaded checkpoints (empty for a
    ///   fresh run)
    /// * `start_page` - First page to fetch, inclusive
    pub async fn run(&self, seed: RunState, start_page: u32) -> Result<RunState, HarvestError> {
        let end_page = self.config.pages.end_page;
        let mut state = seed;
        let mut first_item_pending = true;

        for page in start_page..=end_page {
            if self.cancelled() {
                tracing::info!("Cancellation requested, stopping before page {}", page);
                break;
            }

            let outcome = self.process_page(page, &mut first_item_pending).await;

            if outcome.complete {
                let path = checkpoint_path(&self.output_dir, page);
                if let Err(e) = write_snapshot(&outcome.records, &path) {
                    tracing::error!("Failed to write checkpoint for page {}: {}", page, e);
                }
            } else {
                tracing::warn!(
                    "Page {} incomplete, not checkpointing so a resumed run refetches it",
                    page
                );
            }

            state.extend_page(outcome.records);

            if self.cancelled() {
                tracing::info!("Cancellation requested, stopping after page {}", page);
                break;
            }

            // No delay after the final page
            if page < end_page {
                let delay = self.limiter.page_delay();
                if !delay.is_zero() {
                    tracing::debug!("Waiting {:.2}s before next page", delay.as_secs_f64());
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Ok(state)
    }

    /// Processes one catalog page into its record sequence
    ///
    /// A failed listing fetch yields an empty, incomplete page; a failed
    /// detail fetch yields a stub-only record. Both are logged, neither
    /// stops the run.
    async fn process_page(&self, page: u32, first_item_pending: &mut bool) -> PageOutcome {
        let url = page_url(
            &self.config.site.base_url,
            &self.config.site.list_path_template,
            page,
        );
        tracing::info!("Processing catalog page {} ({})", page, url);

        let stubs = match fetch_page(&self.client, &url).await {
            Ok(html) => extract_list(&html, &self.base_url),
            Err(e) => {
                tracing::warn!("Failed to fetch listing page {}: {}", page, e);
                return PageOutcome {
                    records: Vec::new(),
                    complete: false,
                };
            }
        };

        let stubs = filter_navigation(stubs, &self.config.site.nav_segments);
        tracing::info!("Page {}: {} entries to extract", page, stubs.len());

        let mut records = Vec::with_capacity(stubs.len());
        for stub in stubs {
            if self.cancelled() {
                tracing::info!("Cancellation requested, page {} left partial", page);
                return PageOutcome {
                    records,
                    complete: false,
                };
            }

            // No delay before the very first item of the run
            if *first_item_pending {
                *first_item_pending = false;
            } else {
                let delay = self.limiter.item_delay();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }

            let fetched = fetch_page(&self.client, &stub.url).await;
            let record = match fetched {
                Ok(html) => extract_details(&html, stub),
                Err(e) => {
                    tracing::warn!("Failed to fetch details for {}: {}", stub.url, e);
                    MangaRecord::from_stub(stub)
                }
            };
            tracing::debug!("Extracted details for: {}", record.title);
            records.push(record);
        }

        PageOutcome {
            records,
            complete: true,
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

/// Builds the listing URL for one catalog page from the path template
///
/// Config validation guarantees the template starts with '/', so appending
/// it to the slash-trimmed base is unambiguous.
fn page_url(base_url: &str, template: &str, page: u32) -> String {
    format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        template.replace("{page}", &page.to_string())
    )
}
