//! LLM summarizer - abstractive summaries through the inference port

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use domain::{PageContent, Summary};
use tracing::{debug, instrument, warn};

use crate::{
    ports::{InferencePort, SummarizerPort},
    services::ExtractiveSummarizer,
};

const SYSTEM_PROMPT: &str = "You are a research assistant. Summarize the source text in \
at most three sentences, focusing on what is relevant to the research question. \
Use only facts stated in the source. Reply with the summary only.";

/// Summarizer that asks a language model for the summary text
///
/// Key points and the credibility score always come from the extractive
/// heuristic. When the model fails or answers with nothing, the whole
/// extractive summary is used instead.
pub struct LlmSummarizer {
    inference: Arc<dyn InferencePort>,
    extractive: ExtractiveSummarizer,
    max_input_chars: usize,
}

impl fmt::Debug for LlmSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSummarizer")
            .field("extractive", &self.extractive)
            .field("max_input_chars", &self.max_input_chars)
            .finish_non_exhaustive()
    }
}

impl LlmSummarizer {
    /// Create a new LLM summarizer
    pub fn new(
        inference: Arc<dyn InferencePort>,
        extractive: ExtractiveSummarizer,
        max_input_chars: usize,
    ) -> Self {
        Self {
            inference,
            extractive,
            max_input_chars,
        }
    }

    fn build_prompt(&self, page: &PageContent, query: &str) -> String {
        let text: String = page.text.chars().take(self.max_input_chars).collect();
        format!(
            "Research question: {query}\n\nSource title: {}\n\nSource text:\n{text}",
            page.title
        )
    }
}

#[async_trait]
impl SummarizerPort for LlmSummarizer {
    #[instrument(skip(self, page, query), fields(url = %page.url))]
    async fn summarize(&self, page: &PageContent, query: &str) -> Summary {
        let extractive = self.extractive.summarize_text(&page.text);
        if page.is_empty() {
            return extractive;
        }

        let prompt = self.build_prompt(page, query);
        match self.inference.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(result) if !result.content.trim().is_empty() => {
                debug!(
                    model = %result.model,
                    latency_ms = result.latency_ms,
                    "LLM summary generated"
                );
                Summary {
                    summary: result.content.trim().to_string(),
                    ..extractive
                }
            },
            Ok(result) => {
                warn!(model = %result.model, "LLM returned an empty summary, using extractive");
                extractive
            },
            Err(e) => {
                warn!(error = %e, "LLM summary failed, using extractive");
                extractive
            },
        }
    }

    fn name(&self) -> String {
        format!("llm:{}", self.inference.model_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ApplicationError,
        ports::{Completion, MockInferencePort},
        services::SentenceStrategy,
    };

    const TEXT: &str = "Tokio is an asynchronous runtime for Rust. \
        It provides the building blocks for network applications. \
        It is fast, reliable and scalable for many workloads.";

    fn page() -> PageContent {
        PageContent::new("https://tokio.rs", Some("Tokio".to_string()), TEXT)
    }

    fn result(content: &str) -> Completion {
        Completion {
            content: content.to_string(),
            model: "test-model".to_string(),
            total_tokens: Some(20),
            latency_ms: 5,
        }
    }

    fn summarizer(mock: MockInferencePort, max_input_chars: usize) -> LlmSummarizer {
        LlmSummarizer::new(
            Arc::new(mock),
            ExtractiveSummarizer::new(SentenceStrategy::Leading),
            max_input_chars,
        )
    }

    #[tokio::test]
    async fn uses_model_reply_as_summary() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete()
            .times(1)
            .returning(|_, _| Ok(result("  Tokio is Rust's async runtime.  ")));

        let summary = summarizer(mock, 4000).summarize(&page(), "tokio").await;

        assert_eq!(summary.summary, "Tokio is Rust's async runtime.");
        assert_eq!(summary.key_points.len(), 3);
        assert!(summary.credibility_score.value() > 0);
    }

    #[tokio::test]
    async fn prompt_contains_query_title_and_truncated_text() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete()
            .withf(|system, prompt| {
                system == SYSTEM_PROMPT
                    && prompt.contains("Research question: what is tokio")
                    && prompt.contains("Source title: Tokio")
                    && prompt.ends_with("Tokio is an")
            })
            .returning(|_, _| Ok(result("ok")));

        let summary = summarizer(mock, 11).summarize(&page(), "what is tokio").await;
        assert_eq!(summary.summary, "ok");
    }

    #[tokio::test]
    async fn falls_back_on_error() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete()
            .returning(|_, _| Err(ApplicationError::Inference("offline".to_string())));

        let summary = summarizer(mock, 4000).summarize(&page(), "tokio").await;
        let expected = ExtractiveSummarizer::default().summarize_text(TEXT);
        assert_eq!(summary, expected);
    }

    #[tokio::test]
    async fn falls_back_on_blank_reply() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete()
            .returning(|_, _| Ok(result(" \n ")));

        let summary = summarizer(mock, 4000).summarize(&page(), "tokio").await;
        assert!(summary.summary.starts_with("Tokio is an asynchronous runtime"));
    }

    #[tokio::test]
    async fn empty_page_skips_inference() {
        let mut mock = MockInferencePort::new();
        mock.expect_complete().never();

        let empty = PageContent::new("https://example.com", None, "");
        let summary = summarizer(mock, 4000).summarize(&empty, "tokio").await;
        assert_eq!(summary, Summary::empty());
    }

    #[test]
    fn name_includes_model() {
        let mut mock = MockInferencePort::new();
        mock.expect_model_name()
            .return_const("qwen2.5:1.5b".to_string());

        assert_eq!(summarizer(mock, 4000).name(), "llm:qwen2.5:1.5b");
    }

    #[test]
    fn debug_hides_inference() {
        let s = summarizer(MockInferencePort::new(), 4000);
        let debug = format!("{s:?}");
        assert!(debug.contains("LlmSummarizer"));
        assert!(debug.contains("max_input_chars"));
    }
}
