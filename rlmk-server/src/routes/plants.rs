use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use rlmk_models::api::{
    CreatePlantRequest, HistoryQuery, HouseholdQuery, PlantHistory, PlantPatch, SuccessResponse,
};
use rlmk_models::Plant;

use super::run_blocking;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(query): ApiQuery<HouseholdQuery>,
) -> ApiResult<Json<Vec<Plant>>> {
    let svc = state.services.plants.clone();
    let plants = run_blocking(move || svc.list(query.household_id)).await?;
    Ok(Json(plants))
}

pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(req): ApiJson<CreatePlantRequest>,
) -> ApiResult<(StatusCode, Json<Plant>)> {
    let svc = state.services.plants.clone();
    let plant = run_blocking(move || svc.create(req)).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<PlantPatch>,
) -> ApiResult<Json<Plant>> {
    let svc = state.services.plants.clone();
    let plant = run_blocking(move || svc.update(id, patch)).await?;
    Ok(Json(plant))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    let svc = state.services.plants.clone();
    run_blocking(move || svc.delete(id)).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Normalized sensor history of the plant's device.
pub async fn history(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> ApiResult<Json<PlantHistory>> {
    let svc = state.services.plants.clone();
    let history = run_blocking(move || svc.history(id, query.limit)).await?;
    Ok(Json(history))
}
