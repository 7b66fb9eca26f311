//! REST routes, one module per resource.
//!
//! Services are synchronous (SQLite, bcrypt), so every handler moves its
//! service call onto the blocking pool.

use axum::routing::{get, post, put};
use axum::Router;

use rlmk_core::error::{RlmkError, RlmkResult};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod devices;
pub mod health;
pub mod households;
pub mod inventory;
pub mod plants;
pub mod rooms;

/// Every route below the `/api` prefix.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Households
        .route("/foyers", get(households::list).post(households::create))
        .route(
            "/foyers/:id/members",
            get(households::members).post(households::add_member),
        )
        .route(
            "/foyers/:id/members/:user_id",
            put(households::update_role).delete(households::remove_member),
        )
        // Rooms
        .route("/rooms", get(rooms::list).post(rooms::create))
        .route("/rooms/:id", put(rooms::update).delete(rooms::delete))
        // Inventory
        .route("/stocks", get(inventory::list_stocks).post(inventory::create_stock))
        .route(
            "/stocks/:id",
            put(inventory::update_stock).delete(inventory::delete_stock),
        )
        .route(
            "/aliments",
            get(inventory::list_food_items).post(inventory::create_food_item),
        )
        .route(
            "/aliments/:id",
            put(inventory::update_food_item).delete(inventory::delete_food_item),
        )
        // Plants
        .route("/plants", get(plants::list).post(plants::create))
        .route("/plants/:id", put(plants::update).delete(plants::delete))
        .route("/plants/:id/history", get(plants::history))
        // Devices
        .route("/esp32", get(devices::list).post(devices::register))
        .route("/esp32/readings", post(devices::ingest))
        // Dashboard
        .route("/dashboard", get(dashboard::overview))
}

/// Run a synchronous service call on the blocking thread pool.
pub(crate) async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> RlmkResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::from(RlmkError::Internal(format!("blocking task failed: {e}"))))?
        .map_err(ApiError::from)
}
