//! Ollama-compatible inference engine implementation
//!
//! Connects to any Ollama-compatible server through its native chat API.

mod client;

pub use client::OllamaInferenceEngine;
