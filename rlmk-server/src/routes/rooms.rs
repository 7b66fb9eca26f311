use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use rlmk_models::api::{CreateRoomRequest, HouseholdQuery, RoomPatch, SuccessResponse};
use rlmk_models::Room;

use super::run_blocking;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(query): ApiQuery<HouseholdQuery>,
) -> ApiResult<Json<Vec<Room>>> {
    let svc = state.services.rooms.clone();
    let rooms = run_blocking(move || svc.list(query.household_id)).await?;
    Ok(Json(rooms))
}

pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(req): ApiJson<CreateRoomRequest>,
) -> ApiResult<(StatusCode, Json<Room>)> {
    let svc = state.services.rooms.clone();
    let room = run_blocking(move || svc.create(req)).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<RoomPatch>,
) -> ApiResult<Json<Room>> {
    let svc = state.services.rooms.clone();
    let room = run_blocking(move || svc.update(id, patch)).await?;
    Ok(Json(room))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    let svc = state.services.rooms.clone();
    run_blocking(move || svc.delete(id)).await?;
    Ok(Json(SuccessResponse { success: true }))
}
