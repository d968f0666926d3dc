//! Search provider trait

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::{WebSearchError, WebSearchResponse};

/// Trait for web search providers
///
/// Implemented by all search backends (DuckDuckGo, Google, Hacker News).
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    ///
    /// * `query` - The search query string
    /// * `max_results` - Maximum number of results to return
    ///
    /// # Errors
    ///
    /// Returns an error if the query is empty or the backend fails. An empty
    /// result list is not an error.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<WebSearchResponse, WebSearchError>;

    /// Check if the search provider is healthy/reachable
    async fn is_healthy(&self) -> bool;

    /// Get the provider name (e.g., "google", "duckduckgo")
    fn provider_name(&self) -> &'static str;
}

/// Reject empty and whitespace-only queries, returning the trimmed query
pub(crate) fn validate_query(query: &str) -> Result<&str, WebSearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(WebSearchError::InvalidQuery(
            "Search query cannot be empty".to_string(),
        ));
    }
    Ok(query)
}

/// Reachability check for metered APIs
///
/// Any answer below 500 means the host is up. No search is issued, so
/// readiness polling never spends query quota.
pub(crate) async fn host_reachable(client: &Client, url: &str, provider: &str) -> bool {
    match client.get(url).send().await {
        Ok(response) if response.status().is_server_error() => {
            warn!(provider, status = %response.status(), "Search provider health check failed");
            false
        },
        Ok(_) => true,
        Err(e) => {
            warn!(provider, error = %e, "Search provider unreachable");
            false
        },
    }
}

#[cfg(test)]
pub mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::SearchResult;
    use domain::SearchSource;

    /// Mock search provider for testing
    pub struct MockSearchProvider {
        pub name: &'static str,
        pub results: Vec<SearchResult>,
        pub should_fail: bool,
        pub healthy: bool,
        pub calls: AtomicUsize,
    }

    impl MockSearchProvider {
        #[must_use]
        pub const fn new(name: &'static str) -> Self {
            Self {
                name,
                results: vec![],
                should_fail: false,
                healthy: true,
                calls: AtomicUsize::new(0),
            }
        }

        #[must_use]
        pub fn with_urls(mut self, urls: &[&str]) -> Self {
            self.results = urls
                .iter()
                .zip(1u32..)
                .map(|(url, position)| {
                    SearchResult::new(
                        format!("Result {position}"),
                        (*url).to_string(),
                        String::new(),
                        SearchSource::from_provider(self.name),
                        position,
                    )
                })
                .collect();
            self
        }

        #[must_use]
        pub const fn failing(mut self) -> Self {
            self.should_fail = true;
            self
        }

        #[must_use]
        pub const fn unhealthy(mut self) -> Self {
            self.healthy = false;
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SearchProvider for MockSearchProvider {
        async fn search(
            &self,
            query: &str,
            max_results: usize,
        ) -> Result<WebSearchResponse, WebSearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let query = validate_query(query)?;

            if self.should_fail {
                return Err(WebSearchError::ServiceUnavailable(
                    "Mock service unavailable".to_string(),
                ));
            }

            let results: Vec<_> = self.results.iter().take(max_results).cloned().collect();

            Ok(WebSearchResponse::new(query.to_string(), results, self.name))
        }

        async fn is_healthy(&self) -> bool {
            self.healthy
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }

    #[tokio::test]
    async fn test_mock_provider_respects_max_results() {
        let provider = MockSearchProvider::new("mock").with_urls(&[
            "https://1.example",
            "https://2.example",
            "https://3.example",
        ]);
        let response = provider.search("test", 2).await.unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.provider, "mock");
    }

    #[test]
    fn test_validate_query_trims() {
        assert_eq!(validate_query("  rust  ").unwrap(), "rust");
        assert!(matches!(
            validate_query(" \t\n"),
            Err(WebSearchError::InvalidQuery(_))
        ));
    }
}
