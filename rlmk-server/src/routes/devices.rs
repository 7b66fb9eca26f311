//! ESP32 devices. Reading ingestion is unauthenticated: devices identify
//! themselves by MAC address only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use rlmk_models::api::{HouseholdQuery, IngestReadingsRequest, IngestResponse, RegisterDeviceRequest};
use rlmk_models::Esp32Device;

use super::run_blocking;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiQuery, AuthUser};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(query): ApiQuery<HouseholdQuery>,
) -> ApiResult<Json<Vec<Esp32Device>>> {
    let svc = state.services.devices.clone();
    let devices = run_blocking(move || svc.list(query.household_id)).await?;
    Ok(Json(devices))
}

pub async fn register(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(req): ApiJson<RegisterDeviceRequest>,
) -> ApiResult<(StatusCode, Json<Esp32Device>)> {
    let svc = state.services.devices.clone();
    let device = run_blocking(move || svc.register(req)).await?;
    Ok((StatusCode::CREATED, Json(device)))
}

pub async fn ingest(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<IngestReadingsRequest>,
) -> ApiResult<(StatusCode, Json<IngestResponse>)> {
    let svc = state.services.devices.clone();
    let resp = run_blocking(move || svc.ingest(req)).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
