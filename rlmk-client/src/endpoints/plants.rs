//! Plant endpoints.

use rlmk_core::error::RlmkResult;
use rlmk_models::api::{CreatePlantRequest, PlantHistory, PlantPatch, SuccessResponse};
use rlmk_models::Plant;

use crate::client::{query_string, ApiClient};

impl ApiClient {
    pub async fn list_plants(&self, household_id: Option<i64>) -> RlmkResult<Vec<Plant>> {
        let query = query_string(&[("householdId", household_id.map(|h| h.to_string()))]);
        self.get_json(&format!("/plants{query}")).await
    }

    pub async fn create_plant(&self, req: &CreatePlantRequest) -> RlmkResult<Plant> {
        self.post_json("/plants", req).await
    }

    pub async fn update_plant(&self, id: i64, patch: &PlantPatch) -> RlmkResult<Plant> {
        self.put_json(&format!("/plants/{id}"), patch).await
    }

    pub async fn delete_plant(&self, id: i64) -> RlmkResult<SuccessResponse> {
        self.delete_json(&format!("/plants/{id}")).await
    }

    /// Sensor history of a plant, newest first.
    pub async fn plant_history(&self, id: i64, limit: Option<i64>) -> RlmkResult<PlantHistory> {
        let query = query_string(&[("limit", limit.map(|l| l.to_string()))]);
        self.get_json(&format!("/plants/{id}/history{query}")).await
    }
}
