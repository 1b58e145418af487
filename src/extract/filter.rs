//! Navigation-link filtering
//!
//! Listing pages contain pagination and index links styled like catalog
//! items. Anything whose URL contains a known navigation path segment is
//! not a real entry and gets dropped before detail extraction.

use crate::model::MangaStub;

/// Removes stubs whose URL denotes a navigation/index page
///
/// Pure function; stubs pass through in order. Matching is a plain
/// substring test against each configured segment.
pub fn filter_navigation(stubs: Vec<MangaStub>, nav_segments: &[String]) -> Vec<MangaStub> {
    let before = stubs.len();
    let filtered: Vec<MangaStub> = stubs
        .into_iter()
        .filter(|stub| !nav_segments.iter().any(|segment| stub.url.contains(segment)))
        .collect();

    let dropped = before - filtered.len();
    if dropped > 0 {
        tracing::debug!("Filtered {} navigation links", dropped);
    }
    filtered
}
