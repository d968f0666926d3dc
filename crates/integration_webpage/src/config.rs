//! Page fetch configuration

use serde::{Deserialize, Serialize};

/// Configuration for fetching and extracting result pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum characters of extracted text kept per page
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// User-Agent header sent with page requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Responses larger than this are rejected
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_chars() -> usize {
    3000
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

const fn default_max_body_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for PageFetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_chars: default_max_chars(),
            user_agent: default_user_agent(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl PageFetchConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a limit is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("webpage.timeout_secs must be greater than 0".to_string());
        }
        if self.max_chars == 0 {
            return Err("webpage.max_chars must be greater than 0".to_string());
        }
        if self.max_body_bytes == 0 {
            return Err("webpage.max_body_bytes must be greater than 0".to_string());
        }
        Ok(())
    }
}
