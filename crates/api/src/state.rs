use std::sync::Arc;

use pulsewatch_core::device_config::DeviceConfigStore;
use pulsewatch_core::store::TelemetryStore;
use pulsewatch_events::EventBus;

use crate::config::ServerConfig;
use crate::ingest::IngestService;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (Postgres in production, in-memory in tests).
    pub store: Arc<dyn TelemetryStore>,
    /// Telemetry ingestion pipeline.
    pub ingest: Arc<IngestService>,
    /// Per-device `use_hr_check` flags, process-lifetime.
    pub device_config: Arc<DeviceConfigStore>,
    /// WebSocket connection manager (dashboard viewers).
    pub ws_manager: Arc<WsManager>,
    /// Event bus carrying ingestion outcomes to the dashboard fan-out.
    pub event_bus: Arc<EventBus>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
