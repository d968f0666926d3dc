//! DuckDuckGo HTML search client
//!
//! Scrapes the JavaScript-free results page at `html.duckduckgo.com/html/`.
//! Result blocks are `div.result`, the title link is `a.result__a` and the
//! snippet is `a.result__snippet`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use domain::SearchSource;
use reqwest::{Client, header};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    SearchResult, WebSearchResponse,
    config::WebSearchConfig,
    error::{WebSearchError, retry_after},
    provider::{SearchProvider, validate_query},
};

const DUCKDUCKGO_ORIGIN: &str = "https://duckduckgo.com";

/// DuckDuckGo HTML search client
#[derive(Debug, Clone)]
pub struct DuckDuckGoClient {
    client: Client,
    base_url: String,
    region: String,
    time_filter: String,
    timeout_secs: u64,
}

impl DuckDuckGoClient {
    /// Create a new DuckDuckGo client
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
            base_url: config.duckduckgo_base_url.trim_end_matches('/').to_string(),
            region: config.region.clone(),
            time_filter: config.time_filter.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/html/", self.base_url)
    }

    /// Parse a results page into at most `max_results` hits
    ///
    /// Only the first `max_results` result blocks are considered; blocks
    /// without a usable title link are skipped.
    pub(crate) fn parse_results(
        html: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, WebSearchError> {
        let result_selector = selector("div.result")?;
        let title_selector = selector("a.result__a")?;
        let snippet_selector = selector("a.result__snippet")?;

        let document = Html::parse_document(html);
        let mut results = Vec::new();

        for block in document.select(&result_selector).take(max_results) {
            let Some(title_link) = block.select(&title_selector).next() else {
                continue;
            };

            let Some(url) = title_link.value().attr("href").and_then(normalize_url) else {
                continue;
            };

            let title = element_text(title_link);
            if title.is_empty() {
                continue;
            }

            let snippet = block
                .select(&snippet_selector)
                .next()
                .map(element_text)
                .unwrap_or_default();

            let position = u32::try_from(results.len() + 1).unwrap_or(u32::MAX);
            results.push(SearchResult::new(
                title,
                url,
                snippet,
                SearchSource::DuckDuckGo,
                position,
            ));
        }

        Ok(results)
    }
}

fn selector(css: &str) -> Result<Selector, WebSearchError> {
    Selector::parse(css).map_err(|e| WebSearchError::ParseError(format!("selector {css}: {e}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Turn a result `href` into an absolute target URL
///
/// Redirect links carrying a `uddg` parameter resolve to their target.
/// Any other link pointing at duckduckgo.com is dropped.
pub(crate) fn normalize_url(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if let Some(target) = decode_redirect(href) {
        return Some(target);
    }

    if href.contains("duckduckgo.com") {
        return None;
    }

    if let Some(rest) = href.strip_prefix("//") {
        Some(format!("https://{rest}"))
    } else if href.starts_with('/') {
        Some(format!("{DUCKDUCKGO_ORIGIN}{href}"))
    } else {
        Some(href.to_string())
    }
}

fn decode_redirect(href: &str) -> Option<String> {
    if !href.contains("uddg=") {
        return None;
    }

    let base = Url::parse(DUCKDUCKGO_ORIGIN).ok()?;
    let resolved = base.join(href).ok()?;
    resolved
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned())
        .filter(|target| !target.is_empty())
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    #[instrument(skip(self), fields(provider = "duckduckgo"))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<WebSearchResponse, WebSearchError> {
        let query = validate_query(query)?;
        let start = Instant::now();

        debug!(region = %self.region, time_filter = %self.time_filter, "Sending DuckDuckGo request");

        let response = self
            .client
            .post(self.endpoint())
            .header(header::ACCEPT, "text/html")
            .form(&[
                ("q", query),
                ("kl", self.region.as_str()),
                ("df", self.time_filter.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WebSearchError::from_reqwest(&e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let retry = retry_after(&response);
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "DuckDuckGo returned an error status");
            return Err(WebSearchError::from_status(status, retry, &body));
        }

        let html = response
            .text()
            .await
            .map_err(|e| WebSearchError::ParseError(e.to_string()))?;

        let results = Self::parse_results(&html, max_results)?;

        debug!(
            results = results.len(),
            time_ms = start.elapsed().as_millis(),
            "DuckDuckGo search completed"
        );

        Ok(WebSearchResponse::new(query.to_string(), results, "duckduckgo")
            .with_elapsed(start.elapsed()))
    }

    async fn is_healthy(&self) -> bool {
        match self.client.get(self.endpoint()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "DuckDuckGo health check failed");
                false
            },
        }
    }

    fn provider_name(&self) -> &'static str {
        "duckduckgo"
    }
}
