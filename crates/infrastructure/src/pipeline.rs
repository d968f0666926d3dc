//! Assembles the research pipeline from configuration

use std::sync::Arc;

use application::{
    ApplicationError, ExtractiveSummarizer, LlmSummarizer, ResearchService,
    ports::{PageFetchPort, SearchPort, SummarizerPort},
};
use tracing::info;

use crate::{
    adapters::{OllamaInferenceAdapter, PageFetchAdapter, WebSearchAdapter},
    config::{AppConfig, SummarizerMode},
};

/// Build the summarizer selected by `summarizer.mode`
pub fn build_summarizer(config: &AppConfig) -> Result<Arc<dyn SummarizerPort>, ApplicationError> {
    let extractive = ExtractiveSummarizer::new(config.summarizer.strategy);

    let summarizer: Arc<dyn SummarizerPort> = match config.summarizer.mode {
        SummarizerMode::Extractive => Arc::new(extractive),
        SummarizerMode::Llm => {
            let inference = OllamaInferenceAdapter::new(config.inference.clone())?;
            Arc::new(LlmSummarizer::new(
                Arc::new(inference),
                extractive,
                config.summarizer.llm_max_input_chars,
            ))
        },
    };

    Ok(summarizer)
}

/// Build the research service with real search, fetch and summarize adapters
pub fn build_research_service(config: &AppConfig) -> Result<ResearchService, ApplicationError> {
    let search: Arc<dyn SearchPort> = Arc::new(WebSearchAdapter::new(
        config.websearch.clone(),
        config.retry.clone(),
    )?);
    let pages: Arc<dyn PageFetchPort> = Arc::new(PageFetchAdapter::new(config.webpage.clone())?);
    let summarizer = build_summarizer(config)?;

    let service = ResearchService::new(search, pages, summarizer, config.research.settings());
    info!(
        provider = %service.provider_name(),
        summarizer = %service.summarizer_name(),
        max_results = config.research.max_results,
        delay_ms = config.research.delay_ms,
        "Research pipeline ready"
    );
    Ok(service)
}
