use serde::Deserialize;

/// Main configuration structure for Tankobon
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub pages: PageRangeConfig,
    pub pacing: PacingConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base origin of the catalog site (e.g., "https://mangareader.to")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Catalog listing path template; `{page}` is replaced with the page number
    #[serde(rename = "list-path-template")]
    pub list_path_template: String,

    /// URL path segments that mark navigation/index links rather than entries
    #[serde(rename = "nav-segments", default = "default_nav_segments")]
    pub nav_segments: Vec<String>,
}

fn default_nav_segments() -> Vec<String> {
    vec!["az-list".to_string()]
}

/// Inclusive page range to walk
#[derive(Debug, Clone, Deserialize)]
pub struct PageRangeConfig {
    #[serde(rename = "start-page")]
    pub start_page: u32,

    #[serde(rename = "end-page")]
    pub end_page: u32,
}

/// Randomized delay ranges, in seconds
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Minimum delay before each detail-page fetch
    #[serde(rename = "item-delay-min")]
    pub item_delay_min: f64,

    /// Maximum delay before each detail-page fetch
    #[serde(rename = "item-delay-max")]
    pub item_delay_max: f64,

    /// Minimum delay between catalog pages
    #[serde(rename = "page-delay-min")]
    pub page_delay_min: f64,

    /// Maximum delay between catalog pages
    #[serde(rename = "page-delay-max")]
    pub page_delay_max: f64,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Overall request timeout in seconds
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving per-page checkpoints and the final aggregate
    pub directory: String,

    /// File name of the final deduplicated aggregate, relative to `directory`
    #[serde(rename = "aggregate-file")]
    pub aggregate_file: String,
}
