//! Inference port - chat-style completion against a language model

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A finished completion
#[derive(Debug, Clone)]
pub struct Completion {
    /// Text produced by the model
    pub content: String,
    /// Model that answered
    pub model: String,
    /// Prompt plus completion tokens, when the backend reports them
    pub total_tokens: Option<u32>,
    /// Round trip in milliseconds
    pub latency_ms: u64,
}

/// Language model used by the LLM summarizer
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Send one system instruction and one user message
    async fn complete(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<Completion, ApplicationError>;

    async fn is_healthy(&self) -> bool;

    /// Model identifier, used in the summarizer name
    fn model_name(&self) -> String;
}
