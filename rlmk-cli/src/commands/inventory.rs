//! Inventory tab - stocks and the food items they hold.

use chrono::Utc;
use clap::Subcommand;
use console::style;

use rlmk_client::endpoints::inventory::FoodItemQuery;
use rlmk_core::config::ConfigHandle;
use rlmk_core::error::RlmkResult;
use rlmk_models::api::{CreateFoodItemRequest, CreateStockRequest, FoodItemPatch, StockPatch};
use rlmk_models::FoodItem;

use super::{format_quantity, new_table, or_dash, print_json, print_ok};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum InventoryAction {
    /// List stocks.
    Stocks {
        #[arg(long)]
        room: Option<i64>,
        #[arg(long)]
        household: Option<i64>,
    },
    /// Add a stock to a room.
    AddStock {
        name: String,
        #[arg(long)]
        room: i64,
        /// Stock type, e.g. frigo, placard.
        #[arg(long = "type")]
        stock_type: Option<String>,
    },
    /// Rename a stock, change its type or move it to another room.
    UpdateStock {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        stock_type: Option<String>,
        #[arg(long)]
        room: Option<i64>,
    },
    /// Delete a stock and its food items.
    DeleteStock { id: i64 },
    /// List food items.
    Items {
        #[arg(long)]
        stock: Option<i64>,
        #[arg(long)]
        household: Option<i64>,
        /// Only items at or below the low-stock threshold.
        #[arg(long)]
        low: bool,
    },
    /// Add a food item to a stock.
    AddItem {
        name: String,
        #[arg(long)]
        stock: i64,
        #[arg(short, long, default_value = "1")]
        quantity: f64,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Expiration date (YYYY-MM-DD).
        #[arg(long)]
        expires: Option<String>,
    },
    /// Update a food item.
    UpdateItem {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        quantity: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        expires: Option<String>,
        #[arg(long)]
        stock: Option<i64>,
    },
    /// Delete a food item.
    DeleteItem { id: i64 },
}

/// Flag column for an item: low stock and/or expiring.
fn item_flags(item: &FoodItem) -> String {
    let mut flags = Vec::new();
    if item.is_low_stock() {
        flags.push(style("low").yellow().to_string());
    }
    if item.is_expiring_soon(Utc::now().date_naive()) {
        flags.push(style("expiring").red().to_string());
    }
    flags.join(" ")
}

pub async fn run(config: ConfigHandle, action: InventoryAction, format: OutputFormat) -> RlmkResult<()> {
    let (api, session) = super::session_client(&config).await?;

    match action {
        InventoryAction::Stocks { room, household } => {
            // A room filter alone is enough; otherwise scope to the household.
            let household_id = match room {
                Some(_) => household,
                None => Some(session.household_or_primary(household)?),
            };
            let stocks = api.list_stocks(room, household_id).await?;
            match format {
                OutputFormat::Json => print_json(&stocks)?,
                OutputFormat::Text => {
                    let mut table = new_table(vec!["ID", "Name", "Type", "Room"]);
                    for s in &stocks {
                        table.add_row(vec![
                            or_dash(s.id),
                            s.name.clone(),
                            or_dash(s.stock_type.as_deref()),
                            s.room_id.to_string(),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        InventoryAction::AddStock { name, room, stock_type } => {
            let stock = api
                .create_stock(&CreateStockRequest {
                    name: Some(name),
                    stock_type,
                    room_id: Some(room),
                })
                .await?;
            match format {
                OutputFormat::Json => print_json(&stock)?,
                OutputFormat::Text => print_ok(&format!("Stock {} created (#{}).", stock.name, or_dash(stock.id))),
            }
        }
        InventoryAction::UpdateStock { id, name, stock_type, room } => {
            let stock = api
                .update_stock(id, &StockPatch { name, stock_type, room_id: room })
                .await?;
            match format {
                OutputFormat::Json => print_json(&stock)?,
                OutputFormat::Text => print_ok(&format!("Stock #{id} updated.")),
            }
        }
        InventoryAction::DeleteStock { id } => {
            let resp = api.delete_stock(id).await?;
            match format {
                OutputFormat::Json => print_json(&resp)?,
                OutputFormat::Text => print_ok(&format!("Stock #{id} deleted.")),
            }
        }
        InventoryAction::Items { stock, household, low } => {
            let household_id = match stock {
                Some(_) => household,
                None => Some(session.household_or_primary(household)?),
            };
            let items = api
                .list_food_items(&FoodItemQuery {
                    stock_id: stock,
                    household_id,
                    low_stock: low,
                })
                .await?;
            match format {
                OutputFormat::Json => print_json(&items)?,
                OutputFormat::Text => {
                    let mut table = new_table(vec!["ID", "Name", "Quantity", "Category", "Expires", "Stock", ""]);
                    for item in &items {
                        table.add_row(vec![
                            or_dash(item.id),
                            item.name.clone(),
                            format_quantity(item.quantity, item.unit.as_deref()),
                            or_dash(item.category.as_deref()),
                            or_dash(item.expiration_date.as_deref()),
                            item.stock_id.to_string(),
                            item_flags(item),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        InventoryAction::AddItem {
            name,
            stock,
            quantity,
            unit,
            category,
            expires,
        } => {
            let item = api
                .create_food_item(&CreateFoodItemRequest {
                    name: Some(name),
                    quantity: Some(quantity),
                    unit,
                    category,
                    expiration_date: expires,
                    stock_id: Some(stock),
                })
                .await?;
            match format {
                OutputFormat::Json => print_json(&item)?,
                OutputFormat::Text => print_ok(&format!("{} added (#{}).", item.name, or_dash(item.id))),
            }
        }
        InventoryAction::UpdateItem {
            id,
            name,
            quantity,
            unit,
            category,
            expires,
            stock,
        } => {
            let item = api
                .update_food_item(
                    id,
                    &FoodItemPatch {
                        name,
                        quantity,
                        unit,
                        category,
                        expiration_date: expires,
                        stock_id: stock,
                    },
                )
                .await?;
            match format {
                OutputFormat::Json => print_json(&item)?,
                OutputFormat::Text => print_ok(&format!("{} updated.", item.name)),
            }
        }
        InventoryAction::DeleteItem { id } => {
            let resp = api.delete_food_item(id).await?;
            match format {
                OutputFormat::Json => print_json(&resp)?,
                OutputFormat::Text => print_ok(&format!("Food item #{id} deleted.")),
            }
        }
    }
    Ok(())
}
