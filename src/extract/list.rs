//! Listing-page extraction
//!
//! Parses one catalog page into an ordered sequence of entry stubs. The
//! page layout has drifted over time, so item discovery runs through an
//! ordered chain of container selectors and each sub-field has its own
//! fallback chain.

use super::{element_text, select_first, select_group};
use crate::model::MangaStub;
use scraper::{ElementRef, Html};
use url::Url;

/// Item container selectors, most specific layout first
const ITEM_SELECTORS: &[&str] = &[".item-list .item", ".book-item", ".manga-item", ".item"];

/// Link-bearing element within an item
const LINK_SELECTORS: &[&str] = &["a.manga-poster", "a.poster", "a"];

/// Title element within an item; falls back to the link's own text
const TITLE_SELECTORS: &[&str] = &[".manga-detail h3.manga-name a", ".detail h3 a"];

/// Extracts entry stubs from a catalog listing page
///
/// Never fails: a page with no recognizable items yields an empty vector,
/// and an item without a resolvable link is skipped while the rest of the
/// page is still processed.
///
/// # Arguments
///
/// * `html` - The listing page HTML
/// * `base_url` - The site base URL, used to absolutize relative links
pub fn extract_list(html: &str, base_url: &Url) -> Vec<MangaStub> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let items = select_group(root, ITEM_SELECTORS);
    if items.is_empty() {
        tracing::warn!("No catalog items matched any known selector");
        return Vec::new();
    }
    tracing::debug!("Found {} catalog items", items.len());

    let mut stubs = Vec::with_capacity(items.len());
    for item in items {
        match extract_stub(item, base_url) {
            Some(stub) => stubs.push(stub),
            None => tracing::debug!("Skipping catalog item without a resolvable link"),
        }
    }

    tracing::info!("Extracted {} entries from listing page", stubs.len());
    stubs
}

/// Extracts a single stub from an item container
///
/// Returns None when the item has no link element or its href cannot be
/// resolved to an absolute URL.
fn extract_stub(item: ElementRef<'_>, base_url: &Url) -> Option<MangaStub> {
    let link = select_first(item, LINK_SELECTORS)?;
    let href = link.value().attr("href")?;
    let url = resolve_url(href, base_url)?;

    let title = match select_first(item, TITLE_SELECTORS) {
        Some(element) => element_text(element),
        None => element_text(link),
    };
    let title = if title.is_empty() {
        "Unknown Title".to_string()
    } else {
        title
    };

    let cover_url = extract_cover(link, base_url);

    Some(MangaStub { title, url, cover_url })
}

/// Reads the cover thumbnail from the link's `img` child, preferring the
/// `src` attribute and falling back to the lazy-load `data-src` attribute.
fn extract_cover(link: ElementRef<'_>, base_url: &Url) -> Option<String> {
    let img = select_first(link, &["img"])?;
    let raw = img
        .value()
        .attr("src")
        .filter(|s| !s.trim().is_empty())
        .or_else(|| img.value().attr("data-src"))?;
    resolve_url(raw, base_url)
}

/// Resolves an href against the site base, returning an absolute URL string
fn resolve_url(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    base_url.join(href).ok().map(|u| u.to_string())
}
