//! Origin of a search hit

use serde::{Deserialize, Serialize};
use std::fmt;

/// The search backend a hit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    /// DuckDuckGo HTML results page
    DuckDuckGo,
    /// Google Custom Search JSON API
    Google,
    /// Hacker News search (Algolia)
    HackerNews,
    /// Unknown or generic web source
    #[default]
    Web,
}

impl SearchSource {
    /// Stable lower-case identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "duckduckgo",
            Self::Google => "google",
            Self::HackerNews => "hackernews",
            Self::Web => "web",
        }
    }

    /// Parse a provider name, falling back to [`SearchSource::Web`]
    #[must_use]
    pub fn from_provider(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "duckduckgo" | "ddg" => Self::DuckDuckGo,
            "google" => Self::Google,
            "hackernews" | "hn" => Self::HackerNews,
            _ => Self::Web,
        }
    }
}

impl fmt::Display for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
