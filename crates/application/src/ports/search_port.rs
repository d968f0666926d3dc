//! Web search port
//!
//! Defines how the research pipeline obtains search hits, independent of
//! the backend (DuckDuckGo, Google, Hacker News).

use async_trait::async_trait;
use domain::SearchHit;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for web search operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchPort: Send + Sync {
    /// Search the web and return at most `max_results` hits
    ///
    /// An empty list is a valid answer; errors mean the backend could not
    /// be queried at all.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ApplicationError>;

    /// Check if the search backend is reachable
    async fn is_available(&self) -> bool;

    /// Name of the backend serving queries (e.g. "duckduckgo")
    fn provider_name(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn SearchPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SearchPort>();
    }
}
