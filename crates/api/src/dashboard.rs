//! Event-bus-to-dashboard fan-out.
//!
//! [`DashboardRouter`] subscribes to the telemetry event bus and forwards
//! each [`TelemetryUpdate`] as a JSON text frame to every live dashboard
//! via the [`WsManager`]. Running as its own task keeps delivery fully off
//! the ingestion critical path: ingestion publishes to the bus and moves
//! on; viewer failures are handled entirely inside the manager.

use std::sync::Arc;

use axum::extract::ws::Message;
use pulsewatch_events::TelemetryUpdate;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Forwards telemetry updates from the event bus to dashboard viewers.
pub struct DashboardRouter {
    ws_manager: Arc<WsManager>,
}

impl DashboardRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the fan-out loop.
    ///
    /// Consumes updates from `receiver` until the channel closes (i.e. the
    /// [`EventBus`](pulsewatch_events::EventBus) is dropped). Lagging only
    /// skips updates for dashboards -- the durable record was already
    /// committed before publish.
    pub async fn run(self, mut receiver: broadcast::Receiver<TelemetryUpdate>) {
        loop {
            match receiver.recv().await {
                Ok(update) => match serde_json::to_string(&update) {
                    Ok(json) => {
                        self.ws_manager.broadcast(Message::Text(json.into())).await;
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            device_id = %update.device_id,
                            "Failed to serialize telemetry update"
                        );
                    }
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Dashboard fan-out lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, dashboard fan-out shutting down");
                    break;
                }
            }
        }
    }
}
