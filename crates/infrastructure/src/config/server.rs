//! HTTP server configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (empty = any origin)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: Option<u64>,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Maximum request body size in bytes (default: 64KB)
    #[serde(default = "default_max_body_size")]
    pub max_body_size_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

#[allow(clippy::unnecessary_wraps)]
const fn default_shutdown_timeout() -> Option<u64> {
    Some(30)
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_max_body_size() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            log_format: default_log_format(),
            max_body_size_bytes: default_max_body_size(),
        }
    }
}

impl ServerConfig {
    /// Socket address string for binding, e.g. "0.0.0.0:8000"
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    pub(crate) fn validate(&self, problems: &mut Vec<String>) {
        if self.host.trim().is_empty() {
            problems.push("server.host must not be empty".to_string());
        }
        if self.port == 0 {
            problems.push("server.port must not be 0".to_string());
        }
        if !matches!(self.log_format.to_lowercase().as_str(), "text" | "json") {
            problems.push(format!(
                "server.log_format must be \"text\" or \"json\", got \"{}\"",
                self.log_format
            ));
        }
        if self.max_body_size_bytes == 0 {
            problems.push("server.max_body_size_bytes must be greater than 0".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.max_body_size_bytes, 65_536);
        assert_eq!(config.shutdown_timeout_secs, Some(30));
        assert!(!config.json_logs());
    }

    #[test]
    fn json_log_format_is_case_insensitive() {
        let config = ServerConfig {
            log_format: "JSON".to_string(),
            ..Default::default()
        };
        assert!(config.json_logs());
    }

    #[test]
    fn validate_reports_every_problem() {
        let config = ServerConfig {
            port: 0,
            log_format: "xml".to_string(),
            max_body_size_bytes: 0,
            ..Default::default()
        };
        let mut problems = Vec::new();
        config.validate(&mut problems);
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().any(|p| p.contains("log_format")));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.cors_enabled);
    }
}
