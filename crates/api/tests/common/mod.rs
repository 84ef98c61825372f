#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use pulsewatch_core::device_config::DeviceConfigStore;
use pulsewatch_core::memory::MemoryStore;
use pulsewatch_events::EventBus;
use tower::ServiceExt;

use pulsewatch_api::config::ServerConfig;
use pulsewatch_api::ingest::IngestService;
use pulsewatch_api::router::build_app_router;
use pulsewatch_api::state::AppState;
use pulsewatch_api::ws::WsManager;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build an `AppState` backed by the in-memory store.
///
/// Returns the state plus a direct handle to the store so tests can make
/// assertions against persisted records.
pub fn build_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let event_bus = Arc::new(EventBus::default());
    let ingest = Arc::new(IngestService::new(
        Arc::clone(&store) as _,
        Arc::clone(&event_bus),
    ));

    let state = AppState {
        store: Arc::clone(&store) as _,
        ingest,
        device_config: Arc::new(DeviceConfigStore::new()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus,
        config: Arc::new(test_config()),
    };
    (state, store)
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(state: &AppState) -> Router {
    let config = Arc::clone(&state.config);
    build_app_router(state.clone(), config.as_ref())
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request"),
    )
    .await
    .expect("request failed")
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request"),
    )
    .await
    .expect("request failed")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}
