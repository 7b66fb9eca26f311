//! Login, registration and session introspection.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use rlmk_models::api::{AuthResponse, LoginRequest, MeResponse, RegisterRequest};

use super::run_blocking;
use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let auth = state.services.auth.clone();
    let resp = run_blocking(move || auth.register(req)).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let auth = state.services.auth.clone();
    let resp = run_blocking(move || auth.login(req)).await?;
    Ok(Json(resp))
}

pub async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<MeResponse>> {
    let auth = state.services.auth.clone();
    let resp = run_blocking(move || auth.me(&user.0)).await?;
    Ok(Json(resp))
}
