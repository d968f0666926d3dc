//! Diagnostics endpoint

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// What the running server has loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugResponse {
    pub version: String,
    pub templates_dir: Option<String>,
    pub templates_dir_exists: bool,
    pub templates: Vec<String>,
    pub provider: String,
    pub summarizer: String,
    pub max_results: usize,
}

/// `GET /debug`
pub async fn debug_info(State(state): State<AppState>) -> Json<DebugResponse> {
    Json(DebugResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        templates_dir: state.templates.templates_dir().map(String::from),
        templates_dir_exists: state.templates.templates_dir_exists(),
        templates: state.templates.list_templates(),
        provider: state.research.provider_name(),
        summarizer: state.research.summarizer_name(),
        max_results: state.research.settings().max_results,
    })
}
