//! Research agent HTTP presentation layer
//!
//! Serves the search form, the rendered results page and a small JSON API
//! on top of the research pipeline.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{RequestId, RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
