//! Crisis history endpoint.

use axum::extract::{Query, State};
use axum::Json;
use pulsewatch_core::types::Crisis;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the crisis listing endpoint.
#[derive(Debug, Deserialize)]
pub struct CrisisQuery {
    pub device_id: String,
}

/// GET /crises?device_id=..
///
/// List a device's crisis records, most recent first. An unknown device
/// simply has no crises -- an empty list, not an error.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CrisisQuery>,
) -> AppResult<Json<DataResponse<Vec<Crisis>>>> {
    if query.device_id.trim().is_empty() {
        return Err(AppError::BadRequest("device_id must not be empty".into()));
    }

    let crises = state.store.crises_for_device(&query.device_id).await?;
    Ok(Json(DataResponse { data: crises }))
}
