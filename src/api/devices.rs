//! Device directory endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::device::Device;
use crate::error::{AppError, Result};
use crate::metrics::DeviceMetrics;
use crate::server::AppState;

/// Response for listing devices
#[derive(Debug, Serialize)]
pub struct DeviceListResponse {
    pub devices: Vec<Device>,
    pub total: usize,
}

/// GET /api/v1/devices - List all devices
#[tracing::instrument(name = "http.list_devices", skip(state))]
pub async fn list_devices(State(state): State<AppState>) -> Json<DeviceListResponse> {
    let devices = state.devices.list();
    let total = devices.len();

    Json(DeviceListResponse { devices, total })
}

/// GET /api/v1/devices/{mac} - Get a device by MAC
#[tracing::instrument(name = "http.get_device", skip(state))]
pub async fn get_device(
    State(state): State<AppState>,
    Path(mac): Path<String>,
) -> Result<Json<Device>> {
    Ok(Json(state.devices.get(&mac)?))
}

/// PUT /api/v1/devices/{mac} - Insert or replace a device
#[tracing::instrument(name = "http.put_device", skip(state, device))]
pub async fn put_device(
    State(state): State<AppState>,
    Path(mac): Path<String>,
    Json(mut device): Json<Device>,
) -> Result<Json<Device>> {
    if device.mac.is_empty() {
        device.mac = mac.clone();
    } else if !device.mac.eq_ignore_ascii_case(&mac) {
        return Err(AppError::Validation(format!(
            "MAC in body ({}) does not match path ({})",
            device.mac, mac
        )));
    }

    let stored = state.devices.upsert(device)?;
    DeviceMetrics::set_loaded(state.devices.count());

    Ok(Json(stored))
}

/// DELETE /api/v1/devices/{mac} - Remove a device
#[tracing::instrument(name = "http.delete_device", skip(state))]
pub async fn delete_device(
    State(state): State<AppState>,
    Path(mac): Path<String>,
) -> Result<StatusCode> {
    state.devices.remove(&mac)?;
    DeviceMetrics::set_loaded(state.devices.count());

    Ok(StatusCode::NO_CONTENT)
}
