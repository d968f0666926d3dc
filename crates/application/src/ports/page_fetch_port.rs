//! Page fetch port

use async_trait::async_trait;
use domain::PageContent;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for downloading a result page and extracting its readable text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PageFetchPort: Send + Sync {
    /// Fetch `url` and return its title and boilerplate-free text
    async fn fetch(&self, url: &str) -> Result<PageContent, ApplicationError>;
}
