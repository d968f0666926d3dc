//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the integration crates and
//! provides configuration, telemetry, retry and HTML templating.

pub mod adapters;
pub mod config;
pub mod pipeline;
pub mod retry;
pub mod telemetry;
pub mod templates;

pub use adapters::*;
pub use config::{
    AppConfig, ConfigValidationError, ResearchAppConfig, ServerConfig, SummarizerAppConfig,
    SummarizerMode,
};
pub use pipeline::{build_research_service, build_summarizer};
pub use retry::{RetryConfig, Retryable, with_retry};
pub use telemetry::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
pub use templates::{TemplateConfig, TemplateEngine, TemplateError};
