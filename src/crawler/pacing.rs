//! Randomized request pacing
//!
//! Delays between requests are drawn uniformly from configured ranges to
//! emulate human browsing rhythm: a shorter range between detail-page
//! fetches, a longer one between catalog pages. A zero-width zero range
//! yields no delay at all, which is what the tests run with.

use crate::config::PacingConfig;
use rand::Rng;
use std::time::Duration;

/// Inclusive delay range in seconds
#[derive(Debug, Clone, Copy)]
struct DelayRange {
    min: f64,
    max: f64,
}

impl DelayRange {
    fn sample(&self) -> Duration {
        if self.max <= 0.0 {
            return Duration::ZERO;
        }
        if self.min >= self.max {
            return Duration::from_secs_f64(self.min);
        }
        let secs = rand::thread_rng().gen_range(self.min..=self.max);
        Duration::from_secs_f64(secs)
    }
}

/// Produces randomized delays between requests
///
/// Ranges come validated from the configuration (`min <= max`, both
/// non-negative and finite).
#[derive(Debug, Clone)]
pub struct RateLimiter {
    item: DelayRange,
    page: DelayRange,
}

impl RateLimiter {
    /// Creates a rate limiter from the configured delay ranges
    pub fn new(config: &PacingConfig) -> Self {
        Self {
            item: DelayRange {
                min: config.item_delay_min,
                max: config.item_delay_max,
            },
            page: DelayRange {
                min: config.page_delay_min,
                max: config.page_delay_max,
            },
        }
    }

    /// Samples the delay to apply before a detail-page fetch
    pub fn item_delay(&self) -> Duration {
        self.item.sample()
    }

    /// Samples the delay to apply between catalog pages
    pub fn page_delay(&self) -> Duration {
        self.page.sample()
    }
}
