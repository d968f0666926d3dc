//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let server = state.config.server.clone();

    let router = Router::new()
        // Pages
        .route("/", get(handlers::pages::index))
        .route("/search", post(handlers::pages::search))
        // Research API (v1)
        .route("/v1/research", post(handlers::research::research))
        // Health and diagnostics
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/debug", get(handlers::debug::debug_info))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(server.max_body_size_bytes));

    let router = match cors_layer(&server) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    // Last added runs first
    router
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
}

/// CORS policy from the server configuration
///
/// An empty origin list allows any origin. `None` when CORS is disabled.
pub fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    if !server.cors_enabled {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if server.allowed_origins.is_empty() {
        return Some(layer.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            },
        })
        .collect();
    Some(layer.allow_origin(origins))
}
