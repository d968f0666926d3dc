//! Web search configuration

use std::fmt;

use domain::SearchSource;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Configuration for web search services
#[derive(Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    /// Primary provider: "duckduckgo", "google" or "hackernews"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// DuckDuckGo HTML endpoint base URL
    #[serde(default = "default_duckduckgo_base_url")]
    pub duckduckgo_base_url: String,

    /// Google Custom Search API key (sensitive)
    #[serde(default, skip_serializing)]
    pub google_api_key: Option<SecretString>,

    /// Google Programmable Search Engine id
    #[serde(default)]
    pub google_cx: Option<String>,

    /// Google API base URL
    #[serde(default = "default_google_base_url")]
    pub google_base_url: String,

    /// Hacker News (Algolia) API base URL
    #[serde(default = "default_hackernews_base_url")]
    pub hackernews_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on results requested from any provider
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Fall back to DuckDuckGo when the primary provider fails or finds nothing
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,

    /// DuckDuckGo region code (`kl`)
    #[serde(default = "default_region")]
    pub region: String,

    /// DuckDuckGo time filter (`df`): d, w, m, y or empty
    #[serde(default = "default_time_filter")]
    pub time_filter: String,

    /// User-Agent header sent with search requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl fmt::Debug for WebSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSearchConfig")
            .field("provider", &self.provider)
            .field("duckduckgo_base_url", &self.duckduckgo_base_url)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("google_cx", &self.google_cx)
            .field("google_base_url", &self.google_base_url)
            .field("hackernews_base_url", &self.hackernews_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_results", &self.max_results)
            .field("fallback_enabled", &self.fallback_enabled)
            .field("region", &self.region)
            .field("time_filter", &self.time_filter)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_provider() -> String {
    "duckduckgo".to_string()
}

fn default_duckduckgo_base_url() -> String {
    "https://html.duckduckgo.com".to_string()
}

fn default_google_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_hackernews_base_url() -> String {
    "https://hn.algolia.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_max_results() -> usize {
    6
}

const fn default_fallback_enabled() -> bool {
    true
}

fn default_region() -> String {
    "wt-wt".to_string()
}

fn default_time_filter() -> String {
    "d".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            duckduckgo_base_url: default_duckduckgo_base_url(),
            google_api_key: None,
            google_cx: None,
            google_base_url: default_google_base_url(),
            hackernews_base_url: default_hackernews_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            fallback_enabled: default_fallback_enabled(),
            region: default_region(),
            time_filter: default_time_filter(),
            user_agent: default_user_agent(),
        }
    }
}

impl WebSearchConfig {
    /// Create a configuration for testing (short timeout, few results)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            max_results: 3,
            ..Default::default()
        }
    }

    /// The configured primary provider
    #[must_use]
    pub fn primary_source(&self) -> SearchSource {
        SearchSource::from_provider(&self.provider)
    }

    /// Whether both Google credentials are present
    #[must_use]
    pub const fn has_google_credentials(&self) -> bool {
        self.google_api_key.is_some() && self.google_cx.is_some()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.primary_source() == SearchSource::Web {
            return Err(format!(
                "websearch.provider must be one of: duckduckgo, google, hackernews (got '{}')",
                self.provider
            ));
        }

        if self.max_results == 0 {
            return Err("websearch.max_results must be greater than 0".to_string());
        }

        if self.max_results > 20 {
            return Err("websearch.max_results must be 20 or less".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("websearch.timeout_secs must be greater than 0".to_string());
        }

        let valid_time_filters = ["", "d", "w", "m", "y"];
        if !valid_time_filters.contains(&self.time_filter.as_str()) {
            return Err("websearch.time_filter must be one of: d, w, m, y or empty".to_string());
        }

        Ok(())
    }
}
