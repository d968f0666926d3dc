//! Logging and distributed tracing
//!
//! Console logs go through `tracing-subscriber` (text or JSON); spans can
//! additionally be exported over OTLP to Tempo/Jaeger.

mod otel;

pub use otel::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
