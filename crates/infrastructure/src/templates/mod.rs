//! HTML rendering with Tera
//!
//! The search form, the results page and the error page are compiled into
//! the binary. A `templates_dir` can override any of them (or the shared
//! `base.html` layout) by providing a file with the same name.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::{TemplateConfig, TemplateEngine};
//!
//! let engine = TemplateEngine::new(TemplateConfig::default())?;
//! let html = engine.render_results(&report)?;
//! ```

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use domain::{ResearchQuery, ResearchReport};
use integration_webpage::truncate_chars;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Score at or above which a finding is shown as highly credible
const HIGH_CREDIBILITY: u64 = 75;

/// Score at or above which a finding is shown as moderately credible
const MEDIUM_CREDIBILITY: u64 = 55;

const DEFAULT_TRUNCATE_LENGTH: usize = 200;

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering failed: {0}")]
    Render(String),

    #[error("Template compilation failed: {0}")]
    Compile(String),

    /// Custom templates directory could not be read
    #[error("Failed to read templates from {path}: {message}")]
    Io { path: String, message: String },
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => {
                // Tera keeps the useful part of the message in the source chain
                let mut message = e.to_string();
                let mut source = std::error::Error::source(&e);
                while let Some(inner) = source {
                    message.push_str(": ");
                    message.push_str(&inner.to_string());
                    source = inner.source();
                }
                Self::Render(message)
            },
        }
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Directory with `*.html` files overriding the embedded templates
    #[serde(default)]
    pub templates_dir: Option<String>,

    /// Whether to auto-escape HTML (default: true)
    #[serde(default = "crate::config::default_true")]
    pub auto_escape: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            templates_dir: None,
            auto_escape: true,
        }
    }
}

mod embedded {
    pub const BASE: &str = include_str!("html/base.html");
    pub const INDEX: &str = include_str!("html/index.html");
    pub const RESULTS: &str = include_str!("html/results.html");
    pub const ERROR: &str = include_str!("html/error.html");
}

/// Names of the pages the HTTP layer renders
pub mod names {
    pub const INDEX: &str = "index.html";
    pub const RESULTS: &str = "results.html";
    pub const ERROR: &str = "error.html";
}

/// Tera-backed renderer for the web UI
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
    config: TemplateConfig,
}

impl TemplateEngine {
    /// Build the engine from embedded templates plus any overrides
    pub fn new(config: TemplateConfig) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(if config.auto_escape {
            vec![".html", ".htm"]
        } else {
            vec![]
        });

        tera.add_raw_templates(vec![
            ("base.html", embedded::BASE),
            (names::INDEX, embedded::INDEX),
            (names::RESULTS, embedded::RESULTS),
            (names::ERROR, embedded::ERROR),
        ])
        .map_err(|e| TemplateError::Compile(e.to_string()))?;

        if let Some(dir) = config.templates_dir.as_deref() {
            load_overrides(&mut tera, Path::new(dir))?;
        }

        tera.register_filter("credibility_class", credibility_class_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self {
            tera: Arc::new(tera),
            config,
        })
    }

    /// Render a template with an arbitrary context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String, TemplateError> {
        self.tera
            .render(template_name, context)
            .map_err(TemplateError::from)
    }

    /// The search form
    pub fn render_index(&self) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("max_query_len", &ResearchQuery::MAX_LEN);
        self.render(names::INDEX, &ctx)
    }

    /// The results page for a finished research run
    pub fn render_results(&self, report: &ResearchReport) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("query", &report.query);
        ctx.insert("results", &report.findings);
        ctx.insert("provider", &report.provider);
        ctx.insert("summarizer", &report.summarizer);
        ctx.insert("skipped", &report.skipped);
        ctx.insert("elapsed_ms", &report.elapsed_ms);
        ctx.insert("average_credibility", &report.average_credibility());
        ctx.insert(
            "generated_at",
            &report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        );
        self.render(names::RESULTS, &ctx)
    }

    /// The error page
    pub fn render_error(
        &self,
        status: u16,
        message: &str,
        query: &str,
    ) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("status", &status);
        ctx.insert("message", message);
        ctx.insert("query", query);
        self.render(names::ERROR, &ctx)
    }

    /// Check if a template exists
    #[must_use]
    pub fn template_exists(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// All loaded template names, sorted
    #[must_use]
    pub fn list_templates(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(String::from).collect();
        names.sort();
        names
    }

    /// Configured override directory
    #[must_use]
    pub fn templates_dir(&self) -> Option<&str> {
        self.config.templates_dir.as_deref()
    }

    /// Whether the configured override directory exists
    #[must_use]
    pub fn templates_dir_exists(&self) -> bool {
        self.templates_dir().is_some_and(|dir| Path::new(dir).is_dir())
    }
}

fn load_overrides(tera: &mut Tera, dir: &Path) -> Result<(), TemplateError> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Templates directory not found, using embedded templates");
        return Ok(());
    }

    let io_error = |e: std::io::Error| TemplateError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(io_error)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
        .collect();
    files.sort();

    let mut overrides = Vec::with_capacity(files.len());
    for path in &files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let source = std::fs::read_to_string(path).map_err(io_error)?;
        debug!(template = %name, "Loaded custom template");
        overrides.push((name.to_string(), source));
    }

    if overrides.is_empty() {
        return Ok(());
    }

    let count = overrides.len();
    tera.add_raw_templates(overrides)
        .map_err(|e| TemplateError::Compile(e.to_string()))?;
    info!(dir = %dir.display(), count, "Loaded custom templates");
    Ok(())
}

/// Maps a credibility score to `high`, `medium` or `low`
fn credibility_class_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let score = value
        .as_u64()
        .ok_or_else(|| tera::Error::msg("credibility_class requires a non-negative number"))?;

    let class = if score >= HIGH_CREDIBILITY {
        "high"
    } else if score >= MEDIUM_CREDIBILITY {
        "medium"
    } else {
        "low"
    };
    Ok(Value::String(class.to_string()))
}

/// Truncates to `length` characters (default 200), appending "..." when cut
fn truncate_chars_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("truncate_chars requires a string"))?;

    let length = args
        .get("length")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(DEFAULT_TRUNCATE_LENGTH);

    if text.chars().count() <= length {
        return Ok(Value::String(text.to_string()));
    }
    Ok(Value::String(format!(
        "{}...",
        truncate_chars(text, length).trim_end()
    )))
}
