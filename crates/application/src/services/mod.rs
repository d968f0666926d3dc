//! Application services - Use case implementations

mod extractive_summarizer;
mod llm_summarizer;
mod research_service;

pub use extractive_summarizer::{ExtractiveSummarizer, SentenceStrategy};
pub use llm_summarizer::LlmSummarizer;
pub use research_service::{ResearchService, ResearchSettings};
