//! Stocks and food items ("aliments").

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use rlmk_models::api::{
    CreateFoodItemRequest, CreateStockRequest, FoodItemPatch, StockPatch, SuccessResponse,
};
use rlmk_models::queries::{FoodItemFilter, StockFilter};
use rlmk_models::{FoodItem, Stock};

use super::run_blocking;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

pub async fn list_stocks(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(filter): ApiQuery<StockFilter>,
) -> ApiResult<Json<Vec<Stock>>> {
    let svc = state.services.inventory.clone();
    let stocks = run_blocking(move || svc.list_stocks(&filter)).await?;
    Ok(Json(stocks))
}

pub async fn create_stock(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(req): ApiJson<CreateStockRequest>,
) -> ApiResult<(StatusCode, Json<Stock>)> {
    let svc = state.services.inventory.clone();
    let stock = run_blocking(move || svc.create_stock(req)).await?;
    Ok((StatusCode::CREATED, Json(stock)))
}

pub async fn update_stock(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<StockPatch>,
) -> ApiResult<Json<Stock>> {
    let svc = state.services.inventory.clone();
    let stock = run_blocking(move || svc.update_stock(id, patch)).await?;
    Ok(Json(stock))
}

pub async fn delete_stock(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    let svc = state.services.inventory.clone();
    run_blocking(move || svc.delete_stock(id)).await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn list_food_items(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(filter): ApiQuery<FoodItemFilter>,
) -> ApiResult<Json<Vec<FoodItem>>> {
    let svc = state.services.inventory.clone();
    let items = run_blocking(move || svc.list_food_items(&filter)).await?;
    Ok(Json(items))
}

pub async fn create_food_item(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(req): ApiJson<CreateFoodItemRequest>,
) -> ApiResult<(StatusCode, Json<FoodItem>)> {
    let svc = state.services.inventory.clone();
    let item = run_blocking(move || svc.create_food_item(req)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_food_item(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<FoodItemPatch>,
) -> ApiResult<Json<FoodItem>> {
    let svc = state.services.inventory.clone();
    let item = run_blocking(move || svc.update_food_item(id, patch)).await?;
    Ok(Json(item))
}

pub async fn delete_food_item(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    let svc = state.services.inventory.clone();
    run_blocking(move || svc.delete_food_item(id)).await?;
    Ok(Json(SuccessResponse { success: true }))
}
