use axum::extract::State;
use axum::Json;

use rlmk_models::api::HouseholdQuery;
use rlmk_models::queries::DashboardCounts;

use super::run_blocking;
use crate::error::ApiResult;
use crate::extract::{ApiQuery, AuthUser};
use crate::state::AppState;

/// Row counts for the overview tab. `householdId` is required.
pub async fn overview(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(query): ApiQuery<HouseholdQuery>,
) -> ApiResult<Json<DashboardCounts>> {
    let svc = state.services.dashboard.clone();
    let counts = run_blocking(move || svc.overview(query.household_id)).await?;
    Ok(Json(counts))
}
