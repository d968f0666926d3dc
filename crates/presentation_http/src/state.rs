//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::ResearchService;
use infrastructure::{AppConfig, TemplateEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Search, scrape and summarize pipeline
    pub research: Arc<ResearchService>,
    /// HTML page renderer
    pub templates: Arc<TemplateEngine>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(research: ResearchService, templates: TemplateEngine, config: AppConfig) -> Self {
        Self {
            research: Arc::new(research),
            templates: Arc::new(templates),
            config: Arc::new(config),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("research", &self.research)
            .field("templates_dir", &self.templates.templates_dir())
            .finish_non_exhaustive()
    }
}
