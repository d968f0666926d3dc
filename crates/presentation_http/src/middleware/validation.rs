//! Validated JSON bodies
//!
//! [`ValidatedJson`] deserializes like `Json<T>` and then runs the
//! `validator` rules declared on `T`.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorResponse;

/// Rejection produced by [`ValidatedJson`]
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::JsonError(rejection) => rejection.status(),
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
        };
        let message = match self {
            Self::JsonError(rejection) => rejection.body_text(),
            Self::ValidationFailed(msg) => msg,
        };

        let body = ErrorResponse {
            error: message,
            code: "validation_error".to_string(),
            details: None,
        };
        (status, Json(body)).into_response()
    }
}

/// JSON extractor that validates the body before the handler runs
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;
        Ok(Self(value))
    }
}

/// `field: message` pairs joined by `; `, sorted by field name
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map_or_else(|| err.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
