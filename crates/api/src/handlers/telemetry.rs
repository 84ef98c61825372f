//! Telemetry ingestion endpoint.

use axum::extract::State;
use axum::Json;
use pulsewatch_core::types::CrisisEvent;
use serde::Serialize;

use crate::error::AppResult;
use crate::ingest::TelemetryIn;
use crate::response::DataResponse;
use crate::state::AppState;

/// Acknowledgment returned for an ingested sample.
#[derive(Debug, Serialize)]
pub struct TelemetryAck {
    pub device_id: String,
    /// The crisis lifecycle event this sample produced, if any.
    pub crisis_event: Option<CrisisEvent>,
}

/// POST /telemetry
///
/// Ingest one sample: persist it, update the device's crisis state, and
/// notify live dashboards. Malformed samples are rejected with 400 before
/// anything is written.
pub async fn ingest(
    State(state): State<AppState>,
    Json(input): Json<TelemetryIn>,
) -> AppResult<Json<DataResponse<TelemetryAck>>> {
    let device_id = input.device_id.clone();
    let crisis_event = state.ingest.ingest(input).await?;

    Ok(Json(DataResponse {
        data: TelemetryAck {
            device_id,
            crisis_event,
        },
    }))
}
