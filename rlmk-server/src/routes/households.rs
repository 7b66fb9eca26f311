//! Households and membership.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use rlmk_models::api::{AddMemberRequest, CreateHouseholdRequest, SuccessResponse, UpdateRoleRequest};
use rlmk_models::{Household, Member, Membership, UserHousehold};

use super::run_blocking;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// Households of the caller, primary first.
pub async fn list(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Vec<UserHousehold>>> {
    let svc = state.services.households.clone();
    let households = run_blocking(move || svc.list_for_user(user.user_id()?)).await?;
    Ok(Json(households))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<CreateHouseholdRequest>,
) -> ApiResult<(StatusCode, Json<Household>)> {
    let svc = state.services.households.clone();
    let household = run_blocking(move || svc.create(user.user_id()?, req)).await?;
    Ok((StatusCode::CREATED, Json(household)))
}

pub async fn members(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<Member>>> {
    let svc = state.services.households.clone();
    let members = run_blocking(move || svc.members(id)).await?;
    Ok(Json(members))
}

pub async fn add_member(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<AddMemberRequest>,
) -> ApiResult<(StatusCode, Json<Member>)> {
    let svc = state.services.households.clone();
    let member = run_blocking(move || svc.add_member(id, req)).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_role(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath((id, user_id)): ApiPath<(i64, i64)>,
    ApiJson(req): ApiJson<UpdateRoleRequest>,
) -> ApiResult<Json<Membership>> {
    let svc = state.services.households.clone();
    let membership = run_blocking(move || svc.update_role(id, user_id, req)).await?;
    Ok(Json(membership))
}

pub async fn remove_member(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath((id, user_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Json<SuccessResponse>> {
    let svc = state.services.households.clone();
    run_blocking(move || svc.remove_member(id, user_id)).await?;
    Ok(Json(SuccessResponse { success: true }))
}
