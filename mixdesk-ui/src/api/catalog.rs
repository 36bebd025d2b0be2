//! Form option lists: frequencies and devices

use axum::{extract::State, Json};
use mixdesk_common::db::models::{Device, Frequency};
use mixdesk_common::db::{devices, frequencies};

use crate::api::ApiError;
use crate::AppState;

/// GET /api/frequencies
pub async fn list_frequencies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Frequency>>, ApiError> {
    Ok(Json(frequencies::get_all(&state.db).await?))
}

/// GET /api/devices
pub async fn list_devices(State(state): State<AppState>) -> Result<Json<Vec<Device>>, ApiError> {
    Ok(Json(devices::get_all(&state.db).await?))
}
