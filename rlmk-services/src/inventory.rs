//! Stock and food item management.

use tracing::info;

use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::api::{CreateFoodItemRequest, CreateStockRequest, FoodItemPatch, StockPatch};
use rlmk_models::models::food_item::parse_date;
use rlmk_models::queries::{self, FoodItemFilter, StockFilter};
use rlmk_models::{Database, FoodItem, Room, Stock};

use crate::service::{simple_service, ServiceState};
use crate::validation::{check_quantity, optional_text, require, require_text};

/// Service for storage locations and the food they hold.
#[derive(Clone)]
pub struct InventoryService {
    state: ServiceState,
    database: Database,
}

simple_service!(InventoryService, "inventory");

/// Normalize an expiration date to `YYYY-MM-DD`; blank clears it.
fn expiration_date(value: Option<String>) -> RlmkResult<Option<String>> {
    match optional_text(value) {
        None => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(|d| Some(d.format("%Y-%m-%d").to_string()))
            .ok_or_else(|| RlmkError::validation("expirationDate must be a YYYY-MM-DD date")),
    }
}

impl InventoryService {
    pub fn new(database: Database) -> Self {
        Self {
            state: ServiceState::Created,
            database,
        }
    }

    // ─── Stocks ─────────────────────────────────────────────────────────

    pub fn list_stocks(&self, filter: &StockFilter) -> RlmkResult<Vec<Stock>> {
        let conn = self.database.conn()?;
        queries::list_stocks(&conn, filter)
    }

    pub fn create_stock(&self, req: CreateStockRequest) -> RlmkResult<Stock> {
        let name = require_text(req.name, "name")?;
        let room_id = require(req.room_id, "roomId")?;

        let conn = self.database.conn()?;
        if Room::find_by_id(&conn, room_id)?.is_none() {
            return Err(RlmkError::not_found("Room"));
        }

        let mut stock = Stock::new(name, optional_text(req.stock_type), room_id);
        stock.save(&conn)?;
        info!("created stock {:?} in room {room_id}", stock.id);
        Ok(stock)
    }

    pub fn update_stock(&self, id: i64, patch: StockPatch) -> RlmkResult<Stock> {
        let conn = self.database.conn()?;
        let mut stock = Stock::find_by_id(&conn, id)?.ok_or_else(|| RlmkError::not_found("Stock"))?;

        if let Some(name) = patch.name {
            stock.name = require_text(Some(name), "name")?;
        }
        if patch.stock_type.is_some() {
            stock.stock_type = optional_text(patch.stock_type);
        }
        if let Some(room_id) = patch.room_id {
            if Room::find_by_id(&conn, room_id)?.is_none() {
                return Err(RlmkError::not_found("Room"));
            }
            stock.room_id = room_id;
        }

        if !stock.update(&conn)? {
            return Err(RlmkError::not_found("Stock"));
        }
        Ok(stock)
    }

    /// Delete a stock together with its food items.
    pub fn delete_stock(&self, id: i64) -> RlmkResult<()> {
        let conn = self.database.conn()?;
        if !Stock::delete(&conn, id)? {
            return Err(RlmkError::not_found("Stock"));
        }
        info!("deleted stock {id}");
        Ok(())
    }

    // ─── Food items ─────────────────────────────────────────────────────

    pub fn list_food_items(&self, filter: &FoodItemFilter) -> RlmkResult<Vec<FoodItem>> {
        let conn = self.database.conn()?;
        queries::list_food_items(&conn, filter)
    }

    pub fn create_food_item(&self, req: CreateFoodItemRequest) -> RlmkResult<FoodItem> {
        let name = require_text(req.name, "name")?;
        let quantity = check_quantity(require(req.quantity, "quantity")?)?;
        let stock_id = require(req.stock_id, "stockId")?;
        let expiration = expiration_date(req.expiration_date)?;

        let conn = self.database.conn()?;
        if Stock::find_by_id(&conn, stock_id)?.is_none() {
            return Err(RlmkError::not_found("Stock"));
        }

        let mut item = FoodItem::new(name, quantity, stock_id);
        item.unit = optional_text(req.unit);
        item.category = optional_text(req.category);
        item.expiration_date = expiration;
        item.save(&conn)?;
        info!("added food item {:?} to stock {stock_id}", item.id);
        Ok(item)
    }

    pub fn update_food_item(&self, id: i64, patch: FoodItemPatch) -> RlmkResult<FoodItem> {
        let conn = self.database.conn()?;
        let mut item =
            FoodItem::find_by_id(&conn, id)?.ok_or_else(|| RlmkError::not_found("Food item"))?;

        if let Some(name) = patch.name {
            item.name = require_text(Some(name), "name")?;
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = check_quantity(quantity)?;
        }
        if patch.unit.is_some() {
            item.unit = optional_text(patch.unit);
        }
        if patch.category.is_some() {
            item.category = optional_text(patch.category);
        }
        if patch.expiration_date.is_some() {
            item.expiration_date = expiration_date(patch.expiration_date)?;
        }
        if let Some(stock_id) = patch.stock_id {
            if Stock::find_by_id(&conn, stock_id)?.is_none() {
                return Err(RlmkError::not_found("Stock"));
            }
            item.stock_id = stock_id;
        }

        if !item.update(&conn)? {
            return Err(RlmkError::not_found("Food item"));
        }
        Ok(item)
    }

    pub fn delete_food_item(&self, id: i64) -> RlmkResult<()> {
        let conn = self.database.conn()?;
        if !FoodItem::delete(&conn, id)? {
            return Err(RlmkError::not_found("Food item"));
        }
        Ok(())
    }
}
