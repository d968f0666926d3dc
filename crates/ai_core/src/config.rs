//! Configuration for the inference engine

use serde::{Deserialize, Serialize};

/// Configuration for the inference engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the Ollama-compatible server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Top-p (nucleus) sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "qwen2.5:1.5b".to_string()
}

const fn default_timeout_ms() -> u64 {
    60_000
}

const fn default_max_tokens() -> u32 {
    512
}

// Summaries should stay close to the source text
const fn default_temperature() -> f32 {
    0.3
}

const fn default_top_p() -> f32 {
    0.9
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

impl InferenceConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if a value is out of range.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("inference.base_url must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("inference.timeout_ms must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("inference.temperature must be between 0.0 and 2.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err("inference.top_p must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}
