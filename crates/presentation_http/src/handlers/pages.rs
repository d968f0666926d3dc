//! HTML pages: the search form and the rendered results

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::{error::ApiError, state::AppState};

/// Body of the search form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Response {
    match state.templates.render_index() {
        Ok(html) => Html(html).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// `POST /search`
///
/// Runs the research pipeline and renders the results page. Invalid
/// queries and pipeline failures render the error page instead.
pub async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Response {
    let report = match state.research.research(&form.query).await {
        Ok(report) => report,
        Err(e) => {
            let err = ApiError::from(e);
            return error_page(&state, err.status(), &err.public_message(), &form.query);
        },
    };

    info!(
        findings = report.findings.len(),
        skipped = report.skipped,
        "Rendering results page"
    );

    match state.templates.render_results(&report) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Results template failed");
            error_page(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                "The results page could not be rendered",
                &form.query,
            )
        },
    }
}

fn error_page(state: &AppState, status: StatusCode, message: &str, query: &str) -> Response {
    match state.templates.render_error(status.as_u16(), message, query) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "Error template failed");
            (status, message.to_string()).into_response()
        },
    }
}
