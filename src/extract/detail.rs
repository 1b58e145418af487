//! Detail-page extraction
//!
//! Turns one entry's detail page into a fully populated record. Every field
//! has its own independent fallback chain; a selector miss leaves that field
//! at its documented default and extraction continues. A crawl spanning
//! hundreds of pages must not abort on one malformed document, so this
//! function is total.

use super::{element_text, select_first, select_group};
use crate::model::{MangaRecord, MangaStub};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::OnceLock;

const SYNOPSIS_SELECTOR: &[&str] = &["div.container div.detail-content div.story p.description"];

const AUTHOR_BLOCK_SELECTOR: &[&str] = &["div.container div.detail-info div.author"];

/// Genre selector groups, tried in order; a group is only consulted when
/// every previous group yielded nothing
const GENRE_GROUPS: &[&[&str]] = &[
    &["div.container div.detail-info div.genres a"],
    &[".genres-content .genres-button", ".genres a"],
    &[".info .genres a", ".manga-info .genres a", "[class*='genre']"],
];

const COVER_SELECTOR: &[&str] = &["div.container div.thumb img"];

const RATING_SELECTOR: &[&str] =
    &["div.container div.detail-info div.detail-info-right span.vote-avg strong"];

const STATUS_SELECTORS: &[&str] = &["div.container div.detail-info .status span.value", ".manga-status"];

/// Extracts a full record from an entry's detail page
///
/// Never fails: each field independently falls back to its default when its
/// selectors miss, so the worst case is the stub data with empty defaults.
///
/// # Arguments
///
/// * `html` - The detail page HTML
/// * `stub` - The stub this page belongs to; its fields seed the record
pub fn extract_details(html: &str, stub: MangaStub) -> MangaRecord {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = stub.title;
    let synopsis = extract_synopsis(root);
    let authors = extract_authors(root);
    let genres = extract_genres(root);
    if genres.is_empty() {
        tracing::warn!("No genres found for {}", title);
    }
    let cover_image = extract_cover_image(root);
    let rating = extract_rating(root);
    let status = extract_status(root);

    MangaRecord {
        title,
        url: stub.url,
        cover_url: stub.cover_url,
        synopsis,
        authors,
        genres,
        cover_image,
        rating,
        status,
    }
}

fn extract_synopsis(root: ElementRef<'_>) -> String {
    select_first(root, SYNOPSIS_SELECTOR)
        .map(element_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Not available".to_string())
}

/// Author links live inside a dedicated block; each anchor is one name
fn extract_authors(root: ElementRef<'_>) -> Vec<String> {
    let authors: Vec<String> = select_first(root, AUTHOR_BLOCK_SELECTOR)
        .map(|block| {
            select_group(block, &["a"])
                .into_iter()
                .map(element_text)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if authors.is_empty() {
        vec!["Unknown".to_string()]
    } else {
        authors
    }
}

/// Walks the genre selector groups in order and returns the names from the
/// first group that matches anything. An empty result is legitimate, the
/// caller logs it since genre is a key field of the dataset.
fn extract_genres(root: ElementRef<'_>) -> Vec<String> {
    for group in GENRE_GROUPS {
        let genres: Vec<String> = select_group(root, group)
            .into_iter()
            .map(element_text)
            .filter(|s| !s.is_empty())
            .collect();
        if !genres.is_empty() {
            return genres;
        }
    }
    Vec::new()
}

fn extract_cover_image(root: ElementRef<'_>) -> Option<String> {
    select_first(root, COVER_SELECTOR)
        .and_then(|img| img.value().attr("src"))
        .map(|s| s.to_string())
}

/// Reads the rating element's text and pulls out the first decimal-number
/// substring (e.g. "8.5" out of "8.5/10"). Returns None when the element is
/// missing or carries no numeric text.
fn extract_rating(root: ElementRef<'_>) -> Option<f64> {
    let text = select_first(root, RATING_SELECTOR).map(element_text)?;
    parse_rating(&text)
}

/// Extracts the first decimal number from free-form rating text
fn parse_rating(text: &str) -> Option<f64> {
    rating_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Compiled once; the pattern is a constant
fn rating_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+\.?\d*)").expect("rating pattern is valid"))
}

fn extract_status(root: ElementRef<'_>) -> String {
    select_first(root, STATUS_SELECTORS)
        .map(element_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub() -> MangaStub {
        MangaStub {
            title: "Test Manga".to_string(),
            url: "https://example.com/title/test".to_string(),
            cover_url: None,
        }
    }

    const FULL_PAGE: &str = r#"
        <div class="container">
            <div class="thumb"><img src="https://example.com/full-cover.jpg" /></div>
            <div class="detail-content">
                <div class="story"><p class="description">  A long tale.  </p></div>
            </div>
            <div class="detail-info">
                <div class="author"><a>Eiichiro Oda</a><a>Assistant</a></div>
                <div class="genres"><a>Action</a><a>Adventure</a></div>
                <div class="status">Status: <span class="value">Ongoing</span></div>
                <div class="detail-info-right"><span class="vote-avg"><strong>8.5/10</strong></span></div>
            </div>
        </div>
    "#;

    #[test]
    fn test_full_extraction() {
        let record = extract_details(FULL_PAGE, stub());

        assert_eq!(record.title, "Test Manga");
        assert_eq!(record.synopsis, "A long tale.");
        assert_eq!(record.authors, vec!["Eiichiro Oda", "Assistant"]);
        assert_eq!(record.genres, vec!["Action", "Adventure"]);
        assert_eq!(
            record.cover_image.as_deref(),
            Some("https://example.com/full-cover.jpg")
        );
        assert_eq!(record.rating, Some(8.5));
        assert_eq!(record.status, "Ongoing");
    }

    #[test]
    fn test_missing_synopsis_with_valid_rating() {
        let html = r#"
            <div class="container">
                <div class="detail-info">
                    <div class="detail-info-right"><span class="vote-avg"><strong>Rating: 7.2</strong></span></div>
                </div>
            </div>
        "#;
        let record = extract_details(html, stub());

        assert_eq!(record.synopsis, "Not available");
        assert_eq!(record.rating, Some(7.2));
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let record = extract_details("<html><body></body></html>", stub());

        assert_eq!(record.synopsis, "Not available");
        assert_eq!(record.authors, vec!["Unknown".to_string()]);
        assert!(record.genres.is_empty());
        assert_eq!(record.cover_image, None);
        assert_eq!(record.rating, None);
        assert_eq!(record.status, "Unknown");
    }

    #[test]
    fn test_genre_fallback_groups() {
        // Second group: .genres-content .genres-button
        let html = r#"
            <div class="genres-content">
                <a class="genres-button">Horror</a>
                <a class="genres-button">Mystery</a>
            </div>
        "#;
        let record = extract_details(html, stub());
        assert_eq!(record.genres, vec!["Horror", "Mystery"]);

        // Third group: attribute substring match
        let html = r#"<div><span class="genre-tag">Sports</span></div>"#;
        let record = extract_details(html, stub());
        assert_eq!(record.genres, vec!["Sports"]);
    }

    #[test]
    fn test_genres_empty_never_missing() {
        let record = extract_details("<div></div>", stub());
        assert_eq!(record.genres, Vec::<String>::new());
    }

    #[test]
    fn test_status_fallback_selector() {
        let html = r#"<div class="manga-status">Completed</div>"#;
        let record = extract_details(html, stub());
        assert_eq!(record.status, "Completed");
    }

    #[test]
    fn test_parse_rating_variants() {
        assert_eq!(parse_rating("8.5/10"), Some(8.5));
        assert_eq!(parse_rating("9"), Some(9.0));
        assert_eq!(parse_rating("Rating: 7.2"), Some(7.2));
        assert_eq!(parse_rating("no digits here"), None);
        assert_eq!(parse_rating(""), None);
    }

    #[test]
    fn test_rating_element_without_number() {
        let html = r#"
            <div class="container">
                <div class="detail-info">
                    <div class="detail-info-right"><span class="vote-avg"><strong>N/A</strong></span></div>
                </div>
            </div>
        "#;
        let record = extract_details(html, stub());
        assert_eq!(record.rating, None);
    }

    #[test]
    fn test_stub_cover_url_is_preserved() {
        let mut s = stub();
        s.cover_url = Some("https://example.com/thumb.jpg".to_string());
        let record = extract_details("<div></div>", s);
        assert_eq!(record.cover_url.as_deref(), Some("https://example.com/thumb.jpg"));
    }
}
