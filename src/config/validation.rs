use crate::config::types::{Config, FetchConfig, OutputConfig, PacingConfig, PageRangeConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_page_range(&config.pages)?;
    validate_pacing_config(&config.pacing)?;
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https scheme, got '{}'",
            url.scheme()
        )));
    }

    // The listing URL is base-url with the template appended, so the
    // template must be an absolute path
    if !config.list_path_template.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "list-path-template must start with '/', got '{}'",
            config.list_path_template
        )));
    }

    if !config.list_path_template.contains("{page}") {
        return Err(ConfigError::Validation(format!(
            "list-path-template must contain the '{{page}}' placeholder, got '{}'",
            config.list_path_template
        )));
    }

    if config.nav_segments.iter().any(|s| s.is_empty()) {
        return Err(ConfigError::Validation(
            "nav-segments entries cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the page range
fn validate_page_range(config: &PageRangeConfig) -> Result<(), ConfigError> {
    if config.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start-page must be >= 1, got {}",
            config.start_page
        )));
    }

    if config.end_page < config.start_page {
        return Err(ConfigError::Validation(format!(
            "end-page ({}) must be >= start-page ({})",
            config.end_page, config.start_page
        )));
    }

    Ok(())
}

/// Validates the pacing delay ranges
fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    validate_delay_range("item-delay", config.item_delay_min, config.item_delay_max)?;
    validate_delay_range("page-delay", config.page_delay_min, config.page_delay_max)?;
    Ok(())
}

/// Validates a single min/max delay range
fn validate_delay_range(name: &str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min < 0.0 || max < 0.0 {
        return Err(ConfigError::Validation(format!(
            "{} range must be non-negative, got [{}, {}]",
            name, min, max
        )));
    }

    if !min.is_finite() || !max.is_finite() {
        return Err(ConfigError::Validation(format!(
            "{} range must be finite, got [{}, {}]",
            name, min, max
        )));
    }

    if min > max {
        return Err(ConfigError::Validation(format!(
            "{}-min ({}) must be <= {}-max ({})",
            name, min, name, max
        )));
    }

    Ok(())
}

/// Validates the HTTP client configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    if config.connect_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout must be >= 1s, got {}s",
            config.connect_timeout
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.aggregate_file.is_empty() {
        return Err(ConfigError::Validation(
            "aggregate-file cannot be empty".to_string(),
        ));
    }

    Ok(())
}
