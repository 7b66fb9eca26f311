//! ESP32 device endpoints.

use rlmk_core::error::RlmkResult;
use rlmk_models::api::{IngestReadingsRequest, IngestResponse, RegisterDeviceRequest};
use rlmk_models::Esp32Device;

use crate::client::{query_string, ApiClient};

impl ApiClient {
    pub async fn list_devices(&self, household_id: Option<i64>) -> RlmkResult<Vec<Esp32Device>> {
        let query = query_string(&[("householdId", household_id.map(|h| h.to_string()))]);
        self.get_json(&format!("/esp32{query}")).await
    }

    pub async fn register_device(&self, req: &RegisterDeviceRequest) -> RlmkResult<Esp32Device> {
        self.post_json("/esp32", req).await
    }

    /// Post a batch of readings the way a device does. Needs no token.
    pub async fn ingest_readings(&self, req: &IngestReadingsRequest) -> RlmkResult<IngestResponse> {
        self.post_json("/esp32/readings", req).await
    }
}
