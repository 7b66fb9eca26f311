//! Dashboard endpoint.

use rlmk_core::error::RlmkResult;
use rlmk_models::queries::DashboardCounts;

use crate::client::{query_string, ApiClient};

impl ApiClient {
    /// Aggregate counts for one household.
    pub async fn dashboard(&self, household_id: i64) -> RlmkResult<DashboardCounts> {
        let query = query_string(&[("householdId", Some(household_id.to_string()))]);
        self.get_json(&format!("/dashboard{query}")).await
    }
}
