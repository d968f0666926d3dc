//! HTTP page fetcher

use std::time::Duration;

use reqwest::{Client, header};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    config::PageFetchConfig,
    error::PageFetchError,
    extract::{collapse_whitespace, extract_content, truncate_chars},
};

const ACCEPTED_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml", "text/plain"];

/// A fetched and extracted page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    /// Document title, if the page has one
    pub title: Option<String>,
    /// Readable text
    pub text: String,
}

/// Downloads result pages and extracts their text
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    config: PageFetchConfig,
}

impl PageFetcher {
    /// Create a new fetcher
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: PageFetchConfig) -> Result<Self, PageFetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PageFetchError::ConfigurationError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &PageFetchConfig {
        &self.config
    }

    /// Fetch a page and extract its title and text
    ///
    /// # Errors
    ///
    /// Fails on invalid URLs, transport errors, non-success statuses,
    /// non-document content types and oversized bodies.
    #[instrument(skip(self), fields(max_chars = self.config.max_chars))]
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, PageFetchError> {
        let parsed = parse_url(url)?;
        let timeout_secs = self.config.timeout_secs;

        let mut response = self
            .client
            .get(parsed)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,text/plain;q=0.9")
            .send()
            .await
            .map_err(|e| PageFetchError::from_reqwest(&e, timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Page request failed");
            return Err(PageFetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(media_type);

        if let Some(ref media) = content_type {
            if !ACCEPTED_CONTENT_TYPES.contains(&media.as_str()) {
                return Err(PageFetchError::UnsupportedContentType(media.clone()));
            }
        }

        let limit = self.config.max_body_bytes;
        if response
            .content_length()
            .is_some_and(|len| len > u64::try_from(limit).unwrap_or(u64::MAX))
        {
            return Err(PageFetchError::BodyTooLarge { limit });
        }

        let final_url = response.url().to_string();

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| PageFetchError::from_reqwest(&e, timeout_secs))?
        {
            if body.len() + chunk.len() > limit {
                return Err(PageFetchError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        let body = String::from_utf8_lossy(&body);
        let max_chars = self.config.max_chars;

        let page = if content_type.as_deref() == Some("text/plain") {
            FetchedPage {
                url: final_url,
                title: None,
                text: truncate_chars(&collapse_whitespace(&body), max_chars),
            }
        } else {
            let extracted = extract_content(&body, max_chars);
            FetchedPage {
                url: final_url,
                title: extracted.title,
                text: extracted.text,
            }
        };

        debug!(
            chars = page.text.chars().count(),
            has_title = page.title.is_some(),
            "Page extracted"
        );

        Ok(page)
    }
}

fn parse_url(url: &str) -> Result<Url, PageFetchError> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| PageFetchError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(PageFetchError::InvalidUrl(format!(
            "unsupported scheme '{scheme}'"
        ))),
    }
}

/// `text/HTML; charset=utf-8` becomes `text/html`
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
