//! Hacker News search client (Algolia API)
//!
//! Client for `GET /api/v1/search` (<https://hn.algolia.com/api>), restricted
//! to stories.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use domain::SearchSource;
use reqwest::Client;
use scraper::Html;
use tracing::{debug, instrument, warn};

use crate::{
    SearchResult, WebSearchResponse,
    config::WebSearchConfig,
    error::{WebSearchError, retry_after},
    provider::{SearchProvider, host_reachable, validate_query},
};

const ITEM_URL: &str = "https://news.ycombinator.com/item?id=";
const MAX_HITS_PER_PAGE: usize = 50;
const SNIPPET_CHARS: usize = 300;

mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        #[serde(default)]
        pub hits: Vec<Hit>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Hit {
        pub title: Option<String>,
        pub url: Option<String>,
        pub story_text: Option<String>,
        #[serde(rename = "objectID")]
        pub object_id: String,
        pub points: Option<u32>,
        pub num_comments: Option<u32>,
    }
}

/// Hacker News story search client
#[derive(Debug, Clone)]
pub struct HackerNewsClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HackerNewsClient {
    /// Create a new Hacker News client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &WebSearchConfig) -> Result<Self, WebSearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WebSearchError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.hackernews_base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn convert_results(response: api::SearchResponse) -> Vec<SearchResult> {
        response
            .hits
            .into_iter()
            .filter_map(|hit| {
                let title = hit.title.as_deref().map(str::trim).unwrap_or_default();
                if title.is_empty() {
                    return None;
                }
                let title = title.to_string();
                let url = hit
                    .url
                    .filter(|u| !u.trim().is_empty())
                    .unwrap_or_else(|| format!("{ITEM_URL}{}", hit.object_id));
                let snippet = hit
                    .story_text
                    .as_deref()
                    .map(strip_markup)
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| {
                        format!(
                            "{} points · {} comments",
                            hit.points.unwrap_or(0),
                            hit.num_comments.unwrap_or(0)
                        )
                    });
                Some((title, url, snippet))
            })
            .zip(1u32..)
            .map(|((title, url, snippet), position)| {
                SearchResult::new(title, url, snippet, SearchSource::HackerNews, position)
            })
            .collect()
    }
}

/// Story text arrives as an HTML fragment
fn strip_markup(fragment: &str) -> String {
    let text = Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(SNIPPET_CHARS)
        .collect()
}

#[async_trait]
impl SearchProvider for HackerNewsClient {
    #[instrument(skip(self), fields(provider = "hackernews"))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<WebSearchResponse, WebSearchError> {
        let query = validate_query(query)?;
        let hits_per_page = max_results.clamp(1, MAX_HITS_PER_PAGE).to_string();
        let start = Instant::now();

        let response = self
            .client
            .get(format!("{}/api/v1/search", self.base_url))
            .query(&[
                ("query", query),
                ("tags", "story"),
                ("hitsPerPage", hits_per_page.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WebSearchError::from_reqwest(&e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let retry = retry_after(&response);
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Hacker News search returned an error status");
            return Err(WebSearchError::from_status(status, retry, &body));
        }

        let api_response: api::SearchResponse = response
            .json()
            .await
            .map_err(|e| WebSearchError::ParseError(e.to_string()))?;

        let results = Self::convert_results(api_response);

        debug!(
            results = results.len(),
            time_ms = start.elapsed().as_millis(),
            "Hacker News search completed"
        );

        Ok(WebSearchResponse::new(query.to_string(), results, "hackernews")
            .with_elapsed(start.elapsed()))
    }

    async fn is_healthy(&self) -> bool {
        host_reachable(&self.client, &format!("{}/", self.base_url), "hackernews").await
    }

    fn provider_name(&self) -> &'static str {
        "hackernews"
    }
}
