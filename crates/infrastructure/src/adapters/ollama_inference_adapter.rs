//! Ollama inference adapter - Implements InferencePort using ai_core
//!
//! Used by the LLM summarizer. Works with any Ollama-compatible backend.

use std::{fmt, sync::Arc, time::Instant};

use ai_core::{InferenceConfig, InferenceEngine, InferenceError, InferenceRequest, OllamaInferenceEngine};
use application::{
    error::ApplicationError,
    ports::{InferencePort, Completion},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Adapter for Ollama-compatible inference servers
pub struct OllamaInferenceAdapter {
    engine: Arc<dyn InferenceEngine>,
}

impl fmt::Debug for OllamaInferenceAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaInferenceAdapter")
            .field("model", &self.engine.default_model())
            .finish()
    }
}

impl OllamaInferenceAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = OllamaInferenceEngine::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_engine(Arc::new(engine)))
    }

    /// Wrap an existing engine
    pub fn with_engine(engine: Arc<dyn InferenceEngine>) -> Self {
        Self { engine }
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Inference server unreachable: {msg}"))
            },
            InferenceError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Inference timeout after {ms}ms"))
            },
            InferenceError::ServerError(msg) => ApplicationError::ExternalService(msg),
            InferenceError::ModelNotAvailable(model) => {
                ApplicationError::Configuration(format!("Model not available: {model}"))
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl InferencePort for OllamaInferenceAdapter {
    #[instrument(skip(self, system_prompt, message), fields(message_len = message.len()))]
    async fn complete(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<Completion, ApplicationError> {
        let start = Instant::now();
        let request = InferenceRequest::with_system(system_prompt, message);

        let response = self
            .engine
            .generate(request)
            .await
            .map_err(Self::map_error)?;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let total_tokens = response.usage.as_ref().map(|u| u.total_tokens);

        debug!(
            model = %response.model,
            tokens = ?total_tokens,
            latency_ms,
            "Inference completed"
        );

        Ok(Completion {
            content: response.content,
            model: response.model,
            total_tokens,
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        match self.engine.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Inference health check failed");
                false
            },
        }
    }

    fn model_name(&self) -> String {
        self.engine.default_model().to_string()
    }
}
