//! Web search adapter - Implements SearchPort using integration_websearch

use std::{fmt, sync::Arc};

use application::{error::ApplicationError, ports::SearchPort};
use async_trait::async_trait;
use domain::SearchHit;
use integration_websearch::{SearchProvider, WebSearchClient, WebSearchConfig, WebSearchError};
use tracing::{debug, instrument};

use crate::retry::{RetryConfig, with_retry};

/// Adapter for DuckDuckGo, Google and Hacker News search
pub struct WebSearchAdapter {
    client: Arc<dyn SearchProvider>,
    retry: RetryConfig,
}

impl fmt::Debug for WebSearchAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSearchAdapter")
            .field("provider", &self.client.provider_name())
            .field("max_retries", &self.retry.max_retries)
            .finish()
    }
}

impl WebSearchAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WebSearchConfig, retry: RetryConfig) -> Result<Self, ApplicationError> {
        let client = WebSearchClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_provider(Arc::new(client), retry))
    }

    /// Wrap an already constructed provider
    pub fn with_provider(client: Arc<dyn SearchProvider>, retry: RetryConfig) -> Self {
        Self { client, retry }
    }

    /// Map integration web search error to application error
    fn map_error(err: WebSearchError) -> ApplicationError {
        match err {
            WebSearchError::RequestFailed(e)
            | WebSearchError::ConnectionFailed(e)
            | WebSearchError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WebSearchError::RateLimitExceeded { retry_after_secs } => {
                debug!(retry_after = ?retry_after_secs, "Web search rate limited");
                ApplicationError::RateLimited
            },
            WebSearchError::ParseError(e) => {
                ApplicationError::ExternalService(format!("Unexpected search response: {e}"))
            },
            WebSearchError::ConfigurationError(e) => ApplicationError::Configuration(e),
            WebSearchError::AuthenticationFailed(e) => {
                ApplicationError::Configuration(format!("Search authentication failed: {e}"))
            },
            WebSearchError::InvalidQuery(e) => ApplicationError::InvalidOperation(e),
            WebSearchError::Timeout { timeout_secs } => ApplicationError::ExternalService(
                format!("Search timed out after {timeout_secs}s"),
            ),
        }
    }
}

#[async_trait]
impl SearchPort for WebSearchAdapter {
    #[instrument(skip(self), fields(query_len = query.len(), provider = self.client.provider_name()))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ApplicationError> {
        let response = with_retry(&self.retry, || self.client.search(query, max_results))
            .await
            .map_err(Self::map_error)?;

        debug!(
            results = response.results.len(),
            provider = %response.provider,
            search_time_ms = ?response.search_time_ms,
            "Retrieved search results"
        );

        Ok(response.results)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }

    fn provider_name(&self) -> String {
        self.client.provider_name().to_string()
    }
}
