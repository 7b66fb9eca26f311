//! Room endpoints.

use rlmk_core::error::RlmkResult;
use rlmk_models::api::{CreateRoomRequest, RoomPatch, SuccessResponse};
use rlmk_models::Room;

use crate::client::{query_string, ApiClient};

impl ApiClient {
    /// Rooms, optionally limited to one household.
    pub async fn list_rooms(&self, household_id: Option<i64>) -> RlmkResult<Vec<Room>> {
        let query = query_string(&[("householdId", household_id.map(|h| h.to_string()))]);
        self.get_json(&format!("/rooms{query}")).await
    }

    pub async fn create_room(&self, req: &CreateRoomRequest) -> RlmkResult<Room> {
        self.post_json("/rooms", req).await
    }

    pub async fn update_room(&self, id: i64, patch: &RoomPatch) -> RlmkResult<Room> {
        self.put_json(&format!("/rooms/{id}"), patch).await
    }

    pub async fn delete_room(&self, id: i64) -> RlmkResult<SuccessResponse> {
        self.delete_json(&format!("/rooms/{id}")).await
    }
}
