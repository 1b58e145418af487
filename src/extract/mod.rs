//! Extraction module for catalog and detail pages
//!
//! This module turns raw HTML into structured data, including:
//! - Listing-page extraction into entry stubs
//! - Detail-page extraction into full records
//! - Filtering of navigation links that masquerade as entries
//!
//! All extraction is total: a selector miss or a malformed node degrades to
//! a documented default, never an error. The selector chains are ordered
//! fallbacks; the first strategy that matches wins.

mod detail;
mod filter;
mod list;

pub use detail::extract_details;
pub use filter::filter_navigation;
pub use list::extract_list;

use scraper::{ElementRef, Selector};

/// Returns the first element matched by the first selector in `selectors`
/// that yields a match under `scope`.
///
/// Malformed selector strings are skipped; a chain where nothing matches
/// yields None.
fn select_first<'a>(scope: ElementRef<'a>, selectors: &[&str]) -> Option<ElementRef<'a>> {
    for raw in selectors {
        match Selector::parse(raw) {
            Ok(selector) => {
                if let Some(element) = scope.select(&selector).next() {
                    return Some(element);
                }
            }
            Err(_) => {
                tracing::debug!("Skipping malformed selector: {}", raw);
            }
        }
    }
    None
}

/// Returns all elements matched by the first selector in `selectors` that
/// yields at least one match under `scope`.
fn select_group<'a>(scope: ElementRef<'a>, selectors: &[&str]) -> Vec<ElementRef<'a>> {
    for raw in selectors {
        match Selector::parse(raw) {
            Ok(selector) => {
                let matches: Vec<ElementRef<'a>> = scope.select(&selector).collect();
                if !matches.is_empty() {
                    return matches;
                }
            }
            Err(_) => {
                tracing::debug!("Skipping malformed selector: {}", raw);
            }
        }
    }
    Vec::new()
}

/// Collects and trims the text content of an element
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
