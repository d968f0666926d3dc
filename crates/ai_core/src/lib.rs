//! AI Core - LLM inference client
//!
//! Provides an abstraction for chat-style LLM inference and an implementation
//! for Ollama-compatible servers. The research pipeline uses it to produce
//! abstractive page summaries.

pub mod config;
pub mod error;
pub mod ollama;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use ollama::OllamaInferenceEngine;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
