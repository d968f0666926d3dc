//! Search hit entity

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::SearchSource;

/// A single result returned by a search backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    /// Title of the result as shown by the search engine
    pub title: String,

    /// Target URL
    pub url: String,

    /// Short snippet/description
    pub snippet: String,

    /// Backend that produced the hit
    pub source: SearchSource,

    /// Host part of the URL for display (e.g. "rust-lang.org")
    pub display_url: String,

    /// Position in the result list (1-indexed)
    pub position: u32,
}

impl SearchHit {
    /// Create a new search hit, deriving the display URL
    #[must_use]
    pub fn new(
        title: String,
        url: String,
        snippet: String,
        source: SearchSource,
        position: u32,
    ) -> Self {
        let display_url = display_url_for(&url);
        Self {
            title,
            url,
            snippet,
            source,
            display_url,
            position,
        }
    }
}

/// Derive a short display form of a URL
///
/// Strips the `http://` / `https://` scheme (and a `www.` directly after it)
/// and keeps everything up to the first `/`.
///
/// ```
/// use domain::display_url_for;
///
/// assert_eq!(display_url_for("https://www.rust-lang.org/learn"), "rust-lang.org");
/// assert_eq!(display_url_for("http://docs.rs/tokio"), "docs.rs");
/// ```
#[must_use]
pub fn display_url_for(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .map(|rest| rest.strip_prefix("www.").unwrap_or(rest));

    without_scheme
        .unwrap_or(url)
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Remove hits whose URL was already seen
///
/// Keeps the first occurrence of each exact URL string, preserves order and
/// renumbers positions starting at 1.
#[must_use]
pub fn dedupe_by_url(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    let mut unique: Vec<SearchHit> = hits
        .into_iter()
        .filter(|hit| seen.insert(hit.url.clone()))
        .collect();

    for (position, hit) in (1u32..).zip(unique.iter_mut()) {
        hit.position = position;
    }

    unique
}
