//! Request and response bodies of the REST API.
//!
//! Shared by the server routes and the HTTP client. Request fields are
//! optional so a missing field surfaces as a validation error naming it
//! instead of a deserialization failure.

use serde::{Deserialize, Serialize};

use crate::models::membership::UserHousehold;
use crate::models::user::User;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of delete responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" when every service is running, "degraded" otherwise.
    pub status: String,
    pub version: String,
    #[serde(default)]
    pub services: Vec<ServiceHealth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub name: String,
    pub state: String,
    pub healthy: bool,
}

// ─── Auth ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// When set, a household is created with the new user as admin.
    pub household_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Returned by login and register.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    pub households: Vec<UserHousehold>,
    /// Role in the primary (first joined) household.
    pub role: Option<String>,
}

/// Session introspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: User,
    pub households: Vec<UserHousehold>,
    pub role: Option<String>,
    pub household_id: Option<i64>,
}

// ─── Households ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateHouseholdRequest {
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Option<String>,
}

// ─── Rooms & inventory ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: Option<String>,
    pub room_type: Option<String>,
    pub household_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    pub name: Option<String>,
    pub room_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockRequest {
    pub name: Option<String>,
    pub stock_type: Option<String>,
    pub room_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPatch {
    pub name: Option<String>,
    pub stock_type: Option<String>,
    pub room_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoodItemRequest {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiration_date: Option<String>,
    pub stock_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemPatch {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiration_date: Option<String>,
    pub stock_id: Option<i64>,
}

// ─── Plants & devices ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlantRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    pub household_id: Option<i64>,
    pub room_id: Option<i64>,
    pub device_id: Option<i64>,
    pub moisture_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantPatch {
    pub name: Option<String>,
    pub species: Option<String>,
    pub room_id: Option<i64>,
    pub device_id: Option<i64>,
    pub moisture_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceRequest {
    pub name: Option<String>,
    pub mac_address: Option<String>,
    pub household_id: Option<i64>,
}

/// One value in a device report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingInput {
    #[serde(rename = "type")]
    pub reading_type: Option<String>,
    pub value: Option<f64>,
}

/// Batch of readings posted by a device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReadingsRequest {
    pub mac_address: Option<String>,
    pub readings: Option<Vec<ReadingInput>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub device_id: i64,
    pub stored: usize,
    pub last_seen: String,
}

/// One point of a plant history series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub value: f64,
    pub timestamp: String,
}

/// Latest value of each series, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestValues {
    pub soil_moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub light: Option<f64>,
}

/// Sensor history of a plant, newest first. Soil moisture is normalized to a
/// 0-100 percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantHistory {
    pub plant_id: i64,
    pub device_id: Option<i64>,
    pub soil_moisture: Vec<HistoryPoint>,
    pub temperature: Vec<HistoryPoint>,
    pub light: Vec<HistoryPoint>,
    pub latest: LatestValues,
}

// ─── Query strings ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdQuery {
    pub household_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}
