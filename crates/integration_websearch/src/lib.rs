#![forbid(unsafe_code)]
//! Web search integration for the research agent
//!
//! Three providers implement the common [`SearchProvider`] trait:
//!
//! - [`DuckDuckGoClient`] scrapes the HTML results page (no API key needed)
//! - [`GoogleSearchClient`] uses the Google Custom Search JSON API
//! - [`HackerNewsClient`] searches stories through the Algolia HN API
//!
//! [`WebSearchClient`] selects the primary provider from configuration and
//! falls back to DuckDuckGo when the primary fails or finds nothing.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_websearch::{SearchProvider, WebSearchClient, WebSearchConfig};
//!
//! let client = WebSearchClient::new(WebSearchConfig::default())?;
//! let response = client.search("Rust async runtimes", 5).await?;
//! for hit in response.results {
//!     println!("[{}] {} - {}", hit.position, hit.title, hit.display_url);
//! }
//! ```

mod config;
mod duckduckgo;
mod error;
mod google;
mod hackernews;
mod models;
mod provider;

pub use config::WebSearchConfig;
pub use duckduckgo::DuckDuckGoClient;
pub use error::WebSearchError;
pub use google::GoogleSearchClient;
pub use hackernews::HackerNewsClient;
pub use models::{SearchResult, WebSearchResponse};
pub use provider::SearchProvider;

use std::fmt;

use async_trait::async_trait;
use domain::SearchSource;
use tracing::{debug, info, warn};

/// Combined web search client with fallback support
///
/// The primary provider comes from `WebSearchConfig::provider`. DuckDuckGo
/// serves as fallback unless it already is the primary.
pub struct WebSearchClient {
    primary: Box<dyn SearchProvider>,
    fallback: Option<Box<dyn SearchProvider>>,
    max_results: usize,
    name: &'static str,
}

impl fmt::Debug for WebSearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSearchClient")
            .field("primary", &self.primary.provider_name())
            .field(
                "fallback",
                &self.fallback.as_ref().map(|p| p.provider_name()),
            )
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl WebSearchClient {
    /// Create a new web search client with the given configuration
    ///
    /// A Google primary without credentials degrades to DuckDuckGo.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be initialized.
    pub fn new(config: WebSearchConfig) -> Result<Self, WebSearchError> {
        let primary: Box<dyn SearchProvider> = match config.primary_source() {
            SearchSource::Google if config.has_google_credentials() => {
                Box::new(GoogleSearchClient::new(&config)?)
            },
            SearchSource::Google => {
                warn!("Google search selected but api key or cx missing, using DuckDuckGo");
                Box::new(DuckDuckGoClient::new(&config)?)
            },
            SearchSource::HackerNews => Box::new(HackerNewsClient::new(&config)?),
            SearchSource::DuckDuckGo | SearchSource::Web => {
                Box::new(DuckDuckGoClient::new(&config)?)
            },
        };

        let fallback: Option<Box<dyn SearchProvider>> =
            if config.fallback_enabled && primary.provider_name() != "duckduckgo" {
                Some(Box::new(DuckDuckGoClient::new(&config)?))
            } else {
                None
            };

        info!(
            primary = primary.provider_name(),
            fallback = ?fallback.as_ref().map(|p| p.provider_name()),
            "Initialized web search client"
        );

        Ok(Self::with_providers(primary, fallback, config.max_results))
    }

    /// Assemble a client from explicit providers
    #[must_use]
    pub fn with_providers(
        primary: Box<dyn SearchProvider>,
        fallback: Option<Box<dyn SearchProvider>>,
        max_results: usize,
    ) -> Self {
        let name = match (primary.provider_name(), fallback.is_some()) {
            ("google", true) => "google+duckduckgo",
            ("hackernews", true) => "hackernews+duckduckgo",
            (primary_name, _) => primary_name,
        };

        Self {
            primary,
            fallback,
            max_results,
            name,
        }
    }

    /// Name of the primary provider
    #[must_use]
    pub fn primary_name(&self) -> &'static str {
        self.primary.provider_name()
    }

    /// Check if a fallback provider is configured
    #[must_use]
    pub const fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

#[async_trait]
impl SearchProvider for WebSearchClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<WebSearchResponse, WebSearchError> {
        let max_results = max_results.min(self.max_results);
        let primary_name = self.primary.provider_name();

        let primary_error = match self.primary.search(query, max_results).await {
            Ok(response) if response.has_results() => {
                debug!(
                    provider = primary_name,
                    results = response.results.len(),
                    "Primary provider returned results"
                );
                return Ok(response);
            },
            Ok(response) => {
                if self.fallback.is_none() {
                    return Ok(response);
                }
                info!(provider = primary_name, "Primary provider returned no results, trying fallback");
                None
            },
            Err(e) if e.should_fallback() && self.fallback.is_some() => {
                warn!(provider = primary_name, error = %e, "Primary provider failed, trying fallback");
                Some(e)
            },
            Err(e) => return Err(e),
        };

        let Some(fallback) = self.fallback.as_ref() else {
            return Ok(WebSearchResponse::new(
                query.trim().to_string(),
                Vec::new(),
                primary_name,
            ));
        };

        match fallback.search(query, max_results).await {
            Ok(response) => Ok(response),
            Err(fallback_error) => {
                warn!(error = %fallback_error, "Fallback provider failed");
                Err(primary_error.unwrap_or(fallback_error))
            },
        }
    }

    async fn is_healthy(&self) -> bool {
        if self.primary.is_healthy().await {
            return true;
        }

        match self.fallback.as_ref() {
            Some(fallback) => fallback.is_healthy().await,
            None => false,
        }
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }
}
