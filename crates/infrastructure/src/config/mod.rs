//! Application configuration
//!
//! Values are layered: built-in defaults, then an optional `config.toml`
//! in the working directory, then environment variables prefixed with
//! `RESEARCH_AGENT_` where `__` separates nested keys
//! (e.g. `RESEARCH_AGENT_SERVER__PORT=9000`,
//! `RESEARCH_AGENT_WEBSEARCH__PROVIDER=google`).
//!
//! Sub-modules:
//! - `server`: HTTP server settings
//! - `pipeline`: summarizer selection and research pacing

mod pipeline;
mod server;

use std::path::Path;

use ai_core::InferenceConfig;
use config::{ConfigBuilder, builder::DefaultState};
use integration_webpage::PageFetchConfig;
use integration_websearch::WebSearchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use pipeline::{ResearchAppConfig, SummarizerAppConfig, SummarizerMode};
pub use server::ServerConfig;

use crate::{retry::RetryConfig, telemetry::TelemetryConfig, templates::TemplateConfig};

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

const ENV_PREFIX: &str = "RESEARCH_AGENT";

/// Configuration failed validation
#[derive(Debug, Error)]
#[error("Invalid configuration: {}", .problems.join("; "))]
pub struct ConfigValidationError {
    /// Every problem found, one entry per setting
    pub problems: Vec<String>,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub websearch: WebSearchConfig,

    #[serde(default)]
    pub webpage: PageFetchConfig,

    #[serde(default)]
    pub summarizer: SummarizerAppConfig,

    /// Only used when `summarizer.mode = "llm"`
    #[serde(default)]
    pub inference: InferenceConfig,

    #[serde(default)]
    pub research: ResearchAppConfig,

    /// Retry policy for search requests
    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,

    #[serde(default)]
    pub templates: TemplateConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_layered(None)
    }

    /// Layered load; `env` replaces the process environment when set
    fn load_layered(
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::with_name("config").required(false))
            .add_source(Self::environment().source(env))
            .build()?
            .try_deserialize()
    }

    /// Load configuration from an explicit file, without environment overrides
    pub fn load_from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.allowed_origins")
            .try_parsing(true)
    }

    /// Check every section and report all problems at once
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let mut problems = Vec::new();

        self.server.validate(&mut problems);

        if let Err(e) = self.websearch.validate() {
            problems.push(format!("websearch: {e}"));
        }
        if let Err(e) = self.webpage.validate() {
            problems.push(format!("webpage: {e}"));
        }
        if self.summarizer.mode == SummarizerMode::Llm {
            if let Err(e) = self.inference.validate() {
                problems.push(format!("inference: {e}"));
            }
            if self.summarizer.llm_max_input_chars == 0 {
                problems.push("summarizer.llm_max_input_chars must be greater than 0".to_string());
            }
        }
        if !(1..=20).contains(&self.research.max_results) {
            problems.push(format!(
                "research.max_results must be between 1 and 20, got {}",
                self.research.max_results
            ));
        }
        if let Err(e) = self.retry.validate() {
            problems.push(format!("retry: {e}"));
        }
        if !(0.0..=1.0).contains(&self.telemetry.sampling_ratio) {
            problems.push(format!(
                "telemetry.sampling_ratio must be between 0.0 and 1.0, got {}",
                self.telemetry.sampling_ratio
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigValidationError { problems })
        }
    }

    /// Telemetry settings with the server's log format applied
    #[must_use]
    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            json_output: self.server.json_logs(),
            ..self.telemetry.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use application::SentenceStrategy;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.websearch.provider, "duckduckgo");
        assert_eq!(config.summarizer.mode, SummarizerMode::Extractive);
        assert_eq!(config.research.max_results, 5);
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let file = write_config(
            r#"
[server]
port = 9100
log_format = "json"

[websearch]
provider = "hackernews"
max_results = 10

[summarizer]
mode = "llm"
strategy = "spread"

[research]
max_results = 3
delay_ms = 0
"#,
        );

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.server.json_logs());
        assert_eq!(config.websearch.provider, "hackernews");
        assert_eq!(config.websearch.max_results, 10);
        assert_eq!(config.summarizer.mode, SummarizerMode::Llm);
        assert_eq!(config.summarizer.strategy, SentenceStrategy::Spread);
        assert_eq!(config.research.delay_ms, 0);
        assert_eq!(config.webpage.max_chars, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_nested_keys() {
        let env = [
            ("RESEARCH_AGENT_SERVER__PORT", "9100"),
            (
                "RESEARCH_AGENT_SERVER__ALLOWED_ORIGINS",
                "https://a.example,https://b.example",
            ),
            ("RESEARCH_AGENT_SUMMARIZER__MODE", "llm"),
            ("RESEARCH_AGENT_RESEARCH__DELAY_MS", "0"),
            ("OTHER_APP_SERVER__PORT", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = AppConfig::load_layered(Some(env)).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.server.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.summarizer.mode, SummarizerMode::Llm);
        assert_eq!(config.research.delay_ms, 0);
    }

    #[test]
    fn single_allowed_origin_parses_as_list() {
        let env = std::iter::once((
            "RESEARCH_AGENT_SERVER__ALLOWED_ORIGINS".to_string(),
            "https://only.example".to_string(),
        ))
        .collect();

        let config = AppConfig::load_layered(Some(env)).unwrap();
        assert_eq!(config.server.allowed_origins, vec!["https://only.example"]);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn load_from_empty_file_uses_defaults() {
        let file = write_config("");
        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.templates.templates_dir, None);
    }

    #[test]
    fn validate_collects_problems_from_all_sections() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.websearch.provider = "bing".to_string();
        config.research.max_results = 0;
        config.telemetry.sampling_ratio = 1.5;

        let err = config.validate().unwrap_err();
        assert_eq!(err.problems.len(), 4);
        assert!(err.to_string().starts_with("Invalid configuration:"));
        assert!(err.problems.iter().any(|p| p.starts_with("websearch:")));
    }

    #[test]
    fn inference_only_checked_in_llm_mode() {
        let mut config = AppConfig::default();
        config.inference.base_url = String::new();
        assert!(config.validate().is_ok());

        config.summarizer.mode = SummarizerMode::Llm;
        let err = config.validate().unwrap_err();
        assert!(err.problems.iter().any(|p| p.starts_with("inference:")));
    }

    #[test]
    fn telemetry_config_follows_server_log_format() {
        let mut config = AppConfig::default();
        assert!(!config.telemetry_config().json_output);

        config.server.log_format = "json".to_string();
        assert!(config.telemetry_config().json_output);
    }
}
