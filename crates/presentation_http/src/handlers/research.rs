//! JSON research API

use axum::{Json, extract::State};
use domain::ResearchReport;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Research request body
///
/// Only emptiness is checked here. The length limit applies to the trimmed
/// query and is enforced by `ResearchQuery::parse`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResearchRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub query: String,
}

/// `POST /v1/research`
pub async fn research(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResearchRequest>,
) -> Result<Json<ResearchReport>, ApiError> {
    let report = state.research.research(&request.query).await?;
    Ok(Json(report))
}
