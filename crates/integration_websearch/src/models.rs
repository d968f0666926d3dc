//! Web search data models

use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::SearchHit;
use serde::{Deserialize, Serialize};

/// A single search result; providers produce domain hits directly
pub type SearchResult = SearchHit;

/// Response from a web search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResponse {
    /// Original search query
    pub query: String,

    /// List of search results
    pub results: Vec<SearchResult>,

    /// Timestamp of the search
    pub timestamp: DateTime<Utc>,

    /// Search provider used (e.g., "google", "duckduckgo")
    pub provider: String,

    /// Time taken for the search in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_time_ms: Option<u64>,
}

impl WebSearchResponse {
    /// Create a new search response
    #[must_use]
    pub fn new(query: String, results: Vec<SearchResult>, provider: &str) -> Self {
        Self {
            query,
            results,
            timestamp: Utc::now(),
            provider: provider.to_string(),
            search_time_ms: None,
        }
    }

    /// Record how long the search took
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.search_time_ms = Some(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Check if the response has any results
    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}
