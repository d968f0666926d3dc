//! Page fetch error types

use thiserror::Error;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum PageFetchError {
    /// URL could not be parsed or uses an unsupported scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection to the host failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Request failed for another transport reason
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Server answered with a non-success status
    #[error("HTTP status {status}")]
    HttpStatus {
        /// The HTTP status code
        status: u16,
    },

    /// Response is not an HTML or text document
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Response body exceeds the configured limit
    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge {
        /// Configured limit in bytes
        limit: usize,
    },

    /// HTTP client could not be built
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl PageFetchError {
    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Returns true if a later attempt may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } => true,
            Self::HttpStatus { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
