//! Device configuration endpoints.
//!
//! The field-side bridge polls the GET endpoint (~2 s interval) and relays
//! flag changes to the sensor; operators set the flag via POST.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Per-device configuration, as exchanged over the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub device_id: String,
    /// Whether heart-rate corroboration is required before trusting a
    /// `CRISIS_CONFIRMED` signal.
    pub use_hr_check: bool,
}

/// Query parameters for the config GET endpoint.
#[derive(Debug, Deserialize)]
pub struct DeviceConfigQuery {
    pub device_id: String,
}

/// GET /device-config?device_id=..
///
/// A device that was never configured reports `false` -- never an error.
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<DeviceConfigQuery>,
) -> AppResult<Json<DataResponse<DeviceConfig>>> {
    let use_hr_check = state.device_config.get(&query.device_id);
    Ok(Json(DataResponse {
        data: DeviceConfig {
            device_id: query.device_id,
            use_hr_check,
        },
    }))
}

/// POST /device-config
///
/// Store the flag for a device and echo the stored config.
pub async fn set(
    State(state): State<AppState>,
    Json(config): Json<DeviceConfig>,
) -> AppResult<Json<DataResponse<DeviceConfig>>> {
    if config.device_id.trim().is_empty() {
        return Err(AppError::BadRequest("device_id must not be empty".into()));
    }

    state.device_config.set(&config.device_id, config.use_hr_check);
    Ok(Json(DataResponse { data: config }))
}
