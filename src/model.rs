//! Data model for harvested catalog entries
//!
//! This module defines:
//! - The stub produced by the list extractor (identity + link data)
//! - The full record produced by the detail extractor
//! - The run-wide accumulation state and URL-keyed deduplication

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Minimal identity and link data for one catalog entry, as found on a
/// listing page. The detail URL is the entry's canonical identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangaStub {
    /// Entry title as shown on the listing page
    pub title: String,

    /// Absolute URL of the entry's detail page
    pub url: String,

    /// Cover thumbnail URL from the listing page, if present
    pub cover_url: Option<String>,
}

/// Fully extracted metadata for one catalog entry
///
/// Field names follow the snapshot format consumers of the dataset expect:
/// authors serialize under the `author` key and `cover_image` is omitted
/// entirely when the detail page had no cover element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangaRecord {
    pub title: String,

    /// Absolute detail-page URL; unique within the final aggregate
    pub url: String,

    pub cover_url: Option<String>,

    /// Synopsis text; "Not available" when the page had none
    pub synopsis: String,

    /// Author names; never empty ("Unknown" when none were found)
    #[serde(rename = "author")]
    pub authors: Vec<String>,

    /// Genre names in page order; possibly empty, never null
    pub genres: Vec<String>,

    /// Full-size cover image URL from the detail page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Average rating parsed from free text; None when absent or unparseable
    pub rating: Option<f64>,

    /// Publication status; "Unknown" when not stated
    pub status: String,
}

impl MangaRecord {
    /// Builds a record from a stub alone, with every detail field at its
    /// documented default. Used when the detail page could not be fetched.
    pub fn from_stub(stub: MangaStub) -> Self {
        Self {
            title: stub.title,
            url: stub.url,
            cover_url: stub.cover_url,
            synopsis: "Not available".to_string(),
            authors: vec!["Unknown".to_string()],
            genres: Vec::new(),
            cover_image: None,
            rating: None,
            status: "Unknown".to_string(),
        }
    }
}

/// Process-scoped accumulation of records across the whole run
///
/// Records are appended page by page in catalog order; deduplication
/// happens once at the end of the run, not on insertion.
#[derive(Debug, Default)]
pub struct RunState {
    records: Vec<MangaRecord>,
}

impl RunState {
    /// Creates an empty run state
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one page's worth of records, preserving their order
    pub fn extend_page(&mut self, page_records: Vec<MangaRecord>) {
        self.records.extend(page_records);
    }

    /// Returns the number of records collected so far, pre-dedup
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether nothing has been collected yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the state and returns the deduplicated record list
    pub fn into_unique(self) -> Vec<MangaRecord> {
        dedupe_by_url(self.records)
    }
}

/// Collapses the record list by exact detail-URL equality, keeping the
/// first occurrence of each URL and preserving first-seen order.
pub fn dedupe_by_url(records: Vec<MangaRecord>) -> Vec<MangaRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.url.clone()))
        .collect()
}
