//! Google Custom Search JSON API client
//!
//! Client for `GET /customsearch/v1` (<https://developers.google.com/custom-search/v1/overview>).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use domain::SearchSource;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use crate::{
    SearchResult, WebSearchResponse,
    config::WebSearchConfig,
    error::{WebSearchError, retry_after},
    provider::{SearchProvider, host_reachable, validate_query},
};

/// The API returns at most ten items per request
const MAX_NUM: usize = 10;

/// Google Custom Search API response structures
mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        #[serde(default)]
        pub items: Vec<Item>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Item {
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub link: String,
        #[serde(default)]
        pub snippet: String,
    }
}

/// Google Custom Search client
pub struct GoogleSearchClient {
    client: Client,
    api_key: SecretString,
    cx: String,
    base_url: String,
    timeout_secs: u64,
}

impl std::fmt::Debug for GoogleSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSearchClient")
            .field("api_key", &"[REDACTED]")
            .field("cx", &self.cx)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GoogleSearchClient {
    /// Create a new Google Custom Search client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key or engine id is missing, or the HTTP
    /// client cannot be created.
    pub fn new(config: &WebSearchConfig) -> Result<Self, WebSearchError> {
        let api_key = config.google_api_key.clone().ok_or_else(|| {
            WebSearchError::ConfigurationError("Google API key is required".to_string())
        })?;
        let cx = config.google_cx.clone().ok_or_else(|| {
            WebSearchError::ConfigurationError("Google search engine id (cx) is required".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WebSearchError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            cx,
            base_url: config.google_base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn convert_results(response: api::SearchResponse) -> Vec<SearchResult> {
        response
            .items
            .into_iter()
            .filter(|item| !item.link.is_empty())
            .zip(1u32..)
            .map(|(item, position)| {
                SearchResult::new(
                    item.title.trim().to_string(),
                    item.link,
                    collapse_whitespace(&item.snippet),
                    SearchSource::Google,
                    position,
                )
            })
            .collect()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl SearchProvider for GoogleSearchClient {
    #[instrument(skip(self), fields(provider = "google"))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<WebSearchResponse, WebSearchError> {
        let query = validate_query(query)?;
        let num = max_results.clamp(1, MAX_NUM).to_string();
        let start = Instant::now();

        debug!(num = %num, "Sending Google Custom Search request");

        let response = self
            .client
            .get(format!("{}/customsearch/v1", self.base_url))
            .query(&[
                ("key", self.api_key.expose_secret()),
                ("cx", self.cx.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WebSearchError::from_reqwest(&e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let retry = retry_after(&response);
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Google Custom Search returned an error status");
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
            "Google Custom Search completed"
        );

        Ok(WebSearchResponse::new(query.to_string(), results, "google")
            .with_elapsed(start.elapsed()))
    }

    async fn is_healthy(&self) -> bool {
        host_reachable(&self.client, &format!("{}/", self.base_url), "google").await
    }

    fn provider_name(&self) -> &'static str {
        "google"
    }
}
