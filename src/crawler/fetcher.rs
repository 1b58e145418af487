//! HTTP fetcher implementation
//!
//! This module owns the single HTTP client used for the whole run:
//! - Building the client with a randomized browser user agent
//! - GET requests returning the raw page body
//! - Error classification (timeout vs connection vs HTTP status)
//!
//! The client is the one shared fetch resource of the run; failing to build
//! it is the only fatal error in the whole pipeline.

use crate::config::FetchConfig;
use crate::HarvestError;
use rand::seq::SliceRandom;
use reqwest::Client;
use std::time::Duration;

/// Browser user agents rotated between runs to blend in with organic traffic
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/117.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
];

/// Builds the HTTP client for a harvest run
///
/// Picks one user agent at random and applies the configured timeouts.
/// The same client (and therefore the same user agent) is reused for every
/// request of the run.
///
/// # Arguments
///
/// * `config` - The HTTP client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let user_agent = USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0]);

    tracing::debug!("Using user agent: {}", user_agent);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a single URL and returns its body
///
/// Errors are classified so the caller can log them meaningfully, but every
/// failure here is transient from the pipeline's point of view: the walker
/// degrades to an empty listing or a stub-only record and keeps going.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, HarvestError> {
    let response = client.get(url).send().await.map_err(|e| classify(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify(url, e))
}

/// Maps a reqwest error to the matching harvest error variant
fn classify(url: &str, error: reqwest::Error) -> HarvestError {
    if error.is_timeout() {
        HarvestError::Timeout {
            url: url.to_string(),
        }
    } else {
        HarvestError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
