//! Research pipeline settings: summarizer selection and pacing.

use std::{fmt, time::Duration};

use application::{ResearchSettings, SentenceStrategy};
use serde::{Deserialize, Serialize};

/// Which summarizer turns page text into findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerMode {
    /// Sentence extraction only, no external calls
    #[default]
    Extractive,
    /// Ollama-compatible LLM, falling back to extraction
    Llm,
}

impl fmt::Display for SummarizerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extractive => write!(f, "extractive"),
            Self::Llm => write!(f, "llm"),
        }
    }
}

/// Summarizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerAppConfig {
    #[serde(default)]
    pub mode: SummarizerMode,

    /// Sentence selection used by the extractive summarizer
    #[serde(default)]
    pub strategy: SentenceStrategy,

    /// Page text sent to the LLM is cut to this many characters
    #[serde(default = "default_llm_max_input_chars")]
    pub llm_max_input_chars: usize,
}

const fn default_llm_max_input_chars() -> usize {
    4000
}

impl Default for SummarizerAppConfig {
    fn default() -> Self {
        Self {
            mode: SummarizerMode::default(),
            strategy: SentenceStrategy::default(),
            llm_max_input_chars: default_llm_max_input_chars(),
        }
    }
}

/// Research run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchAppConfig {
    /// Maximum number of search hits analyzed per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Pause between two result pages in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

const fn default_max_results() -> usize {
    5
}

const fn default_delay_ms() -> u64 {
    500
}

impl Default for ResearchAppConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl ResearchAppConfig {
    /// Settings for the research service
    #[must_use]
    pub const fn settings(&self) -> ResearchSettings {
        ResearchSettings {
            max_results: self.max_results,
            delay_between_pages: Duration::from_millis(self.delay_ms),
        }
    }
}
