//! Page fetch adapter - Implements PageFetchPort using integration_webpage

use application::{error::ApplicationError, ports::PageFetchPort};
use async_trait::async_trait;
use domain::PageContent;
use integration_webpage::{PageFetchConfig, PageFetchError, PageFetcher};
use tracing::{debug, instrument};

/// Downloads result pages and strips them down to readable text
#[derive(Debug, Clone)]
pub struct PageFetchAdapter {
    fetcher: PageFetcher,
}

impl PageFetchAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: PageFetchConfig) -> Result<Self, ApplicationError> {
        let fetcher = PageFetcher::new(config).map_err(Self::map_error)?;
        Ok(Self { fetcher })
    }

    fn map_error(err: PageFetchError) -> ApplicationError {
        match err {
            PageFetchError::InvalidUrl(e) => ApplicationError::InvalidOperation(e),
            PageFetchError::ConnectionFailed(e) | PageFetchError::RequestFailed(e) => {
                ApplicationError::ExternalService(e)
            },
            PageFetchError::Timeout { timeout_secs } => ApplicationError::ExternalService(
                format!("Page fetch timed out after {timeout_secs}s"),
            ),
            PageFetchError::HttpStatus { status: 429 } => ApplicationError::RateLimited,
            PageFetchError::HttpStatus {
                status: status @ (404 | 410),
            } => ApplicationError::NotFound(format!("Page returned HTTP {status}")),
            PageFetchError::HttpStatus { status } => {
                ApplicationError::ExternalService(format!("Page returned HTTP {status}"))
            },
            err @ (PageFetchError::UnsupportedContentType(_)
            | PageFetchError::BodyTooLarge { .. }) => {
                ApplicationError::InvalidOperation(err.to_string())
            },
            PageFetchError::ConfigurationError(e) => ApplicationError::Configuration(e),
        }
    }
}

#[async_trait]
impl PageFetchPort for PageFetchAdapter {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<PageContent, ApplicationError> {
        let page = self.fetcher.fetch(url).await.map_err(Self::map_error)?;
        debug!(
            final_url = %page.url,
            chars = page.text.chars().count(),
            has_title = page.title.is_some(),
            "Extracted page"
        );
        Ok(PageContent::new(page.url, page.title, page.text))
    }
}
