//! Summarizer port

use async_trait::async_trait;
use domain::{PageContent, Summary};
#[cfg(test)]
use mockall::automock;

/// Port for turning page text into a [`Summary`]
///
/// Summarizers do not fail: implementations degrade to a simpler heuristic
/// instead of returning an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SummarizerPort: Send + Sync {
    /// Summarize a page in the context of the research query
    async fn summarize(&self, page: &PageContent, query: &str) -> Summary;

    /// Short identifier shown in reports (e.g. "extractive:leading")
    fn name(&self) -> String;
}
