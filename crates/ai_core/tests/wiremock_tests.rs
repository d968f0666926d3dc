//! Integration tests for the Ollama inference engine using WireMock
//!
//! These tests mock the Ollama HTTP API to verify client behavior without
//! requiring an actual Ollama server.

use ai_core::{InferenceConfig, InferenceEngine, InferenceError, InferenceRequest, OllamaInferenceEngine};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn inference_config_for_mock(base_url: &str) -> InferenceConfig {
    InferenceConfig {
        base_url: base_url.to_string(),
        default_model: "test-model".to_string(),
        temperature: 0.3,
        max_tokens: 100,
        top_p: 0.9,
        timeout_ms: 5000,
    }
}

fn chat_success_response() -> serde_json::Value {
    serde_json::json!({
        "model": "test-model",
        "message": {
            "role": "assistant",
            "content": "Rust is a systems programming language focused on safety."
        },
        "done": true,
        "prompt_eval_count": 42,
        "eval_count": 12
    })
}

fn models_list_response() -> serde_json::Value {
    serde_json::json!({
        "models": [
            {"name": "test-model:latest"},
            {"name": "llama3.2:3b"}
        ]
    })
}

fn engine_for(server: &MockServer) -> OllamaInferenceEngine {
    OllamaInferenceEngine::new(inference_config_for_mock(&server.uri())).unwrap()
}

// =============================================================================
// Generate
// =============================================================================

#[tokio::test]
async fn generate_returns_content_and_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_response()))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let response = engine
        .generate(InferenceRequest::with_system("Summarize.", "Rust text"))
        .await
        .unwrap();

    assert!(response.content.starts_with("Rust is"));
    assert_eq!(response.model, "test-model");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    let usage = response.usage.unwrap();
    assert_eq!(usage.total_tokens, 54);
}

#[tokio::test]
async fn generate_maps_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let err = engine
        .generate(InferenceRequest::with_system("Summarize.", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, InferenceError::ServerError(ref msg) if msg.contains("boom")));
}

#[tokio::test]
async fn generate_maps_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let err = engine
        .generate(InferenceRequest::with_system("Summarize.", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, InferenceError::RateLimited));
}

#[tokio::test]
async fn generate_maps_unknown_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let err = engine
        .generate(InferenceRequest {
            model: Some("missing".to_string()),
            ..InferenceRequest::with_system("Summarize.", "hi")
        })
        .await
        .unwrap_err();

    assert!(matches!(err, InferenceError::ModelNotAvailable(ref m) if m == "missing"));
}

#[tokio::test]
async fn generate_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let err = engine
        .generate(InferenceRequest::with_system("Summarize.", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, InferenceError::InvalidResponse(_)));
}

// =============================================================================
// Health & models
// =============================================================================

#[tokio::test]
async fn health_check_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(models_list_response()))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    assert!(engine.health_check().await.unwrap());
}

#[tokio::test]
async fn health_check_fails_without_default_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(models_list_response()))
        .mount(&server)
        .await;

    let mut config = inference_config_for_mock(&server.uri());
    config.default_model = "mistral:7b".to_string();
    let engine = OllamaInferenceEngine::new(config).unwrap();
    assert!(!engine.health_check().await.unwrap());
}

#[tokio::test]
async fn health_check_server_error_is_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!engine_for(&server).health_check().await.unwrap());
}

#[tokio::test]
async fn health_check_unreachable_server_is_unhealthy() {
    let engine =
        OllamaInferenceEngine::new(inference_config_for_mock("http://127.0.0.1:1")).unwrap();
    assert!(!engine.health_check().await.unwrap());
}

#[tokio::test]
async fn list_models_returns_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(models_list_response()))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let models = engine.list_models().await.unwrap();
    assert_eq!(models, vec!["test-model:latest", "llama3.2:3b"]);
}
