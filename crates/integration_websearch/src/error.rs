//! Web search error types

use thiserror::Error;

/// Errors that can occur during web search operations
#[derive(Debug, Error)]
pub enum WebSearchError {
    /// Connection to the search service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to search service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from search service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Search query is invalid or empty
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// API key is missing or invalid
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl WebSearchError {
    /// Map a transport error from reqwest
    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Map a non-success HTTP status shared by all providers
    pub(crate) fn from_status(
        status: reqwest::StatusCode,
        retry_after_secs: Option<u64>,
        body: &str,
    ) -> Self {
        match status.as_u16() {
            429 => Self::RateLimitExceeded { retry_after_secs },
            401 | 403 => Self::AuthenticationFailed(format!("HTTP {status}")),
            500..=599 => Self::ServiceUnavailable(format!("HTTP {status}")),
            _ => Self::RequestFailed(format!("HTTP {status}: {body}")),
        }
    }

    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::ServiceUnavailable(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }

    /// Returns true if fallback should be attempted
    #[must_use]
    pub const fn should_fallback(&self) -> bool {
        !matches!(self, Self::InvalidQuery(_))
    }
}

/// Read the `Retry-After` header as whole seconds
pub(crate) fn retry_after(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_retryable_errors() {
        assert!(WebSearchError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(WebSearchError::ServiceUnavailable("test".to_string()).is_retryable());
        assert!(WebSearchError::Timeout { timeout_secs: 15 }.is_retryable());
        assert!(
            WebSearchError::RateLimitExceeded {
                retry_after_secs: Some(60)
            }
            .is_retryable()
        );

        assert!(!WebSearchError::RequestFailed("400".to_string()).is_retryable());
        assert!(!WebSearchError::InvalidQuery("test".to_string()).is_retryable());
        assert!(!WebSearchError::AuthenticationFailed("test".to_string()).is_retryable());
        assert!(!WebSearchError::ParseError("test".to_string()).is_retryable());
    }

    #[test]
    fn test_should_fallback() {
        assert!(WebSearchError::ConnectionFailed("test".to_string()).should_fallback());
        assert!(WebSearchError::AuthenticationFailed("test".to_string()).should_fallback());
        assert!(WebSearchError::ParseError("test".to_string()).should_fallback());
        assert!(!WebSearchError::InvalidQuery("test".to_string()).should_fallback());
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            WebSearchError::from_status(StatusCode::TOO_MANY_REQUESTS, Some(5), ""),
            WebSearchError::RateLimitExceeded {
                retry_after_secs: Some(5)
            }
        ));
        assert!(matches!(
            WebSearchError::from_status(StatusCode::FORBIDDEN, None, ""),
            WebSearchError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            WebSearchError::from_status(StatusCode::BAD_GATEWAY, None, ""),
            WebSearchError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            WebSearchError::from_status(StatusCode::BAD_REQUEST, None, "bad cx"),
            WebSearchError::RequestFailed(ref msg) if msg.contains("bad cx")
        ));
    }

    #[test]
    fn test_error_display() {
        let err = WebSearchError::RateLimitExceeded {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));

        let err = WebSearchError::Timeout { timeout_secs: 15 };
        assert!(err.to_string().contains("15 seconds"));
    }
}
