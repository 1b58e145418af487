//! Tankobon: a manga catalog metadata harvester
//!
//! This crate crawls a paginated catalog listing, visits each entry's detail
//! page, and extracts structured metadata into durable JSON snapshots. It
//! tolerates drifting markup through layered selector fallbacks, paces its
//! requests to avoid bans, and checkpoints progress after every page.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for snapshot operations
pub type SnapshotResult<T> = std::result::Result<T, SnapshotError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{dedupe_by_url, MangaRecord, MangaStub, RunState};
