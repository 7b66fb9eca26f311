use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use rlmk_core::constants::APP_VERSION;
use rlmk_models::api::HealthResponse;

use crate::state::AppState;

/// Liveness check. Answers 503 while any service is not running.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let services = state.services.health_check();
    let (code, status) = if state.services.is_healthy() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status: status.into(),
            version: APP_VERSION.into(),
            services,
        }),
    )
}
