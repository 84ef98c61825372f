pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /telemetry          ingest one sample (POST)
/// /crises             list a device's crises (GET, ?device_id=)
/// /device-config      get / set the per-device flag (GET, POST)
/// /ws/dashboard       live dashboard WebSocket
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/telemetry", post(handlers::telemetry::ingest))
        .route("/crises", get(handlers::crisis::list))
        .route(
            "/device-config",
            get(handlers::device_config::get).post(handlers::device_config::set),
        )
        .route("/ws/dashboard", get(ws::dashboard_ws_handler))
}
