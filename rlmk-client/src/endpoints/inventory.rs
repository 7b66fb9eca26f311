//! Stock and food item endpoints.

use rlmk_core::error::RlmkResult;
use rlmk_models::api::{CreateFoodItemRequest, CreateStockRequest, FoodItemPatch, StockPatch, SuccessResponse};
use rlmk_models::{FoodItem, Stock};

use crate::client::{query_string, ApiClient};

/// Filters for listing food items.
#[derive(Debug, Clone, Default)]
pub struct FoodItemQuery {
    pub stock_id: Option<i64>,
    pub household_id: Option<i64>,
    pub low_stock: bool,
}

impl ApiClient {
    pub async fn list_stocks(&self, room_id: Option<i64>, household_id: Option<i64>) -> RlmkResult<Vec<Stock>> {
        let query = query_string(&[
            ("roomId", room_id.map(|r| r.to_string())),
            ("householdId", household_id.map(|h| h.to_string())),
        ]);
        self.get_json(&format!("/stocks{query}")).await
    }

    pub async fn create_stock(&self, req: &CreateStockRequest) -> RlmkResult<Stock> {
        self.post_json("/stocks", req).await
    }

    pub async fn update_stock(&self, id: i64, patch: &StockPatch) -> RlmkResult<Stock> {
        self.put_json(&format!("/stocks/{id}"), patch).await
    }

    pub async fn delete_stock(&self, id: i64) -> RlmkResult<SuccessResponse> {
        self.delete_json(&format!("/stocks/{id}")).await
    }

    pub async fn list_food_items(&self, filter: &FoodItemQuery) -> RlmkResult<Vec<FoodItem>> {
        let query = query_string(&[
            ("stockId", filter.stock_id.map(|s| s.to_string())),
            ("householdId", filter.household_id.map(|h| h.to_string())),
            ("lowStock", filter.low_stock.then(|| "true".to_string())),
        ]);
        self.get_json(&format!("/aliments{query}")).await
    }

    pub async fn create_food_item(&self, req: &CreateFoodItemRequest) -> RlmkResult<FoodItem> {
        self.post_json("/aliments", req).await
    }

    pub async fn update_food_item(&self, id: i64, patch: &FoodItemPatch) -> RlmkResult<FoodItem> {
        self.put_json(&format!("/aliments/{id}"), patch).await
    }

    pub async fn delete_food_item(&self, id: i64) -> RlmkResult<SuccessResponse> {
        self.delete_json(&format!("/aliments/{id}")).await
    }
}
