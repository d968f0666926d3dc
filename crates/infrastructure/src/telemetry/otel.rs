//! Subscriber and OTLP pipeline setup
//!
//! An unreachable collector does not stop the server unless
//! `graceful_fallback` is turned off.

use std::time::Duration;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{Sampler, SdkTracerProvider},
};
use serde::{Deserialize, Serialize};
use tracing::{Subscriber, info, warn};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{
    EnvFilter, Layer, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

/// Configuration for logging and tracing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether OTLP span export is enabled
    #[serde(default)]
    pub enabled: bool,

    /// OTLP gRPC endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Sampling ratio (0.0 - 1.0)
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,

    #[serde(default = "default_export_timeout")]
    pub export_timeout_secs: u64,

    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit log lines as JSON instead of text
    #[serde(default)]
    pub json_output: bool,

    /// Continue with console logging when the exporter cannot be built
    #[serde(default = "default_graceful_fallback")]
    pub graceful_fallback: bool,
}

fn default_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "research-agent".to_string()
}

const fn default_sampling_ratio() -> f64 {
    1.0
}

const fn default_export_timeout() -> u64 {
    10
}

fn default_log_filter() -> String {
    "info,presentation_http=debug,tower_http=info".to_string()
}

const fn default_graceful_fallback() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
            export_timeout_secs: default_export_timeout(),
            log_filter: default_log_filter(),
            json_output: false,
            graceful_fallback: default_graceful_fallback(),
        }
    }
}

impl TelemetryConfig {
    fn sampler(&self) -> Sampler {
        if self.sampling_ratio >= 1.0 {
            Sampler::AlwaysOn
        } else if self.sampling_ratio <= 0.0 {
            Sampler::AlwaysOff
        } else {
            Sampler::TraceIdRatioBased(self.sampling_ratio)
        }
    }
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// OTLP exporter could not be created
    #[error("Failed to create OTLP exporter: {0}")]
    Exporter(String),
}

/// Flushes and shuts down the tracer provider when dropped
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl std::fmt::Debug for TelemetryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryGuard")
            .field("exporting", &self.provider.is_some())
            .finish()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::error!(error = ?e, "Failed to shut down tracer provider");
            }
        }
    }
}

fn fmt_layer<S>(json: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(true).boxed()
    }
}

fn build_provider(config: &TelemetryConfig) -> Result<SdkTracerProvider, TelemetryError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.endpoint)
        .with_timeout(Duration::from_secs(config.export_timeout_secs))
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .build();

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_sampler(config.sampler())
        .with_resource(resource)
        .build())
}

/// Install the global subscriber
///
/// Keep the returned guard alive for the lifetime of the process; dropping
/// it flushes pending spans.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let mut fallback_reason = None;
    let provider = if config.enabled {
        match build_provider(config) {
            Ok(provider) => Some(provider),
            Err(e) if config.graceful_fallback => {
                fallback_reason = Some(e.to_string());
                None
            },
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    let otel_layer = provider
        .as_ref()
        .map(|p| OpenTelemetryLayer::new(p.tracer(config.service_name.clone())));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(config.json_output))
        .with(otel_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    match (&provider, fallback_reason) {
        (Some(_), _) => info!(
            endpoint = %config.endpoint,
            service = %config.service_name,
            sampling = config.sampling_ratio,
            "Telemetry initialized with OTLP export"
        ),
        (None, Some(reason)) => warn!(
            endpoint = %config.endpoint,
            error = %reason,
            "OTLP exporter unavailable, logging to console only"
        ),
        (None, None) => info!(json = config.json_output, "Telemetry initialized (console only)"),
    }

    Ok(TelemetryGuard { provider })
}
