//! Filtered listings and aggregate counts.
//!
//! List endpoints accept optional filters; each filter adds one `AND` clause
//! with a bound parameter. Household filters on stocks and food items join
//! through rooms.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use rlmk_core::constants::{EXPIRING_SOON_DAYS, LOW_STOCK_THRESHOLD};
use rlmk_core::error::{RlmkError, RlmkResult};

use crate::models::device::Esp32Device;
use crate::models::food_item::FoodItem;
use crate::models::plant::Plant;
use crate::models::room::Room;
use crate::models::stock::Stock;

/// Accumulates `WHERE` clauses with their bound parameters.
#[derive(Default)]
struct Conditions {
    clauses: Vec<String>,
    params: Vec<Box<dyn rusqlite::types::ToSql>>,
}

impl Conditions {
    fn push<T: rusqlite::types::ToSql + 'static>(&mut self, clause: &str, value: T) {
        let n = self.params.len() + 1;
        self.clauses.push(clause.replace('?', &format!("?{n}")));
        self.params.push(Box::new(value));
    }

    fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    fn query<T>(
        &self,
        conn: &Connection,
        sql: &str,
        map: fn(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    ) -> RlmkResult<Vec<T>> {
        let mut stmt = conn.prepare(sql).map_err(|e| RlmkError::Database(e.to_string()))?;
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            self.params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), map)
            .map_err(|e| RlmkError::Database(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(rows)
    }
}

// ─── Rooms ──────────────────────────────────────────────────────────────────

/// List rooms, optionally restricted to one household.
pub fn list_rooms(conn: &Connection, household_id: Option<i64>) -> RlmkResult<Vec<Room>> {
    let mut cond = Conditions::default();
    if let Some(h) = household_id {
        cond.push("foyer_id = ?", h);
    }
    let sql = format!("SELECT * FROM pieces {} ORDER BY nom ASC, id ASC", cond.where_sql());
    cond.query(conn, &sql, Room::from_row)
}

// ─── Stocks ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockFilter {
    pub room_id: Option<i64>,
    pub household_id: Option<i64>,
}

/// List stocks matching the filter.
pub fn list_stocks(conn: &Connection, filter: &StockFilter) -> RlmkResult<Vec<Stock>> {
    let mut cond = Conditions::default();
    if let Some(r) = filter.room_id {
        cond.push("s.piece_id = ?", r);
    }
    if let Some(h) = filter.household_id {
        cond.push("p.foyer_id = ?", h);
    }
    let sql = format!(
        "SELECT s.* FROM stocks s
         INNER JOIN pieces p ON p.id = s.piece_id
         {} ORDER BY s.nom ASC, s.id ASC",
        cond.where_sql()
    );
    cond.query(conn, &sql, Stock::from_row)
}

// ─── Food items ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemFilter {
    pub stock_id: Option<i64>,
    pub household_id: Option<i64>,
    /// Only items at or below the low-stock threshold.
    #[serde(default)]
    pub low_stock: bool,
}

/// List food items matching the filter, soonest expiration first.
pub fn list_food_items(conn: &Connection, filter: &FoodItemFilter) -> RlmkResult<Vec<FoodItem>> {
    let mut cond = Conditions::default();
    if let Some(s) = filter.stock_id {
        cond.push("a.stock_id = ?", s);
    }
    if let Some(h) = filter.household_id {
        cond.push("p.foyer_id = ?", h);
    }
    if filter.low_stock {
        cond.push("a.quantite <= ?", LOW_STOCK_THRESHOLD);
    }
    let sql = format!(
        "SELECT a.* FROM aliments a
         INNER JOIN stocks s ON s.id = a.stock_id
         INNER JOIN pieces p ON p.id = s.piece_id
         {} ORDER BY a.date_peremption IS NULL, a.date_peremption ASC, a.nom ASC",
        cond.where_sql()
    );
    cond.query(conn, &sql, FoodItem::from_row)
}

// ─── Plants & devices ───────────────────────────────────────────────────────

/// List plants, optionally restricted to one household.
pub fn list_plants(conn: &Connection, household_id: Option<i64>) -> RlmkResult<Vec<Plant>> {
    let mut cond = Conditions::default();
    if let Some(h) = household_id {
        cond.push("foyer_id = ?", h);
    }
    let sql = format!("SELECT * FROM plantes {} ORDER BY nom ASC, id ASC", cond.where_sql());
    cond.query(conn, &sql, Plant::from_row)
}

/// List devices, optionally restricted to one household.
pub fn list_devices(conn: &Connection, household_id: Option<i64>) -> RlmkResult<Vec<Esp32Device>> {
    let mut cond = Conditions::default();
    if let Some(h) = household_id {
        cond.push("foyer_id = ?", h);
    }
    let sql = format!("SELECT * FROM esp32 {} ORDER BY nom ASC, id ASC", cond.where_sql());
    cond.query(conn, &sql, Esp32Device::from_row)
}

// ─── Dashboard ──────────────────────────────────────────────────────────────

/// Row counts shown on the overview tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub members: i64,
    pub rooms: i64,
    pub stocks: i64,
    pub food_items: i64,
    pub low_stock_items: i64,
    pub expiring_soon: i64,
    pub plants: i64,
    pub devices: i64,
}

/// Count the rows belonging to a household. `today` anchors the
/// expiring-soon window; expired items are included.
pub fn dashboard_counts(
    conn: &Connection,
    household_id: i64,
    today: NaiveDate,
) -> RlmkResult<DashboardCounts> {
    let count = |sql: &str| -> RlmkResult<i64> {
        conn.query_row(sql, [household_id], |row| row.get(0))
            .map_err(|e| RlmkError::Database(e.to_string()))
    };

    let horizon = (today + chrono::Duration::days(EXPIRING_SOON_DAYS))
        .format("%Y-%m-%d")
        .to_string();

    let expiring_soon = conn
        .query_row(
            "SELECT COUNT(*) FROM aliments a
             INNER JOIN stocks s ON s.id = a.stock_id
             INNER JOIN pieces p ON p.id = s.piece_id
             WHERE p.foyer_id = ?1
               AND a.date_peremption IS NOT NULL
               AND date(a.date_peremption) <= ?2",
            params![household_id, horizon],
            |row| row.get(0),
        )
        .map_err(|e| RlmkError::Database(e.to_string()))?;

    let low_stock_items = conn
        .query_row(
            "SELECT COUNT(*) FROM aliments a
             INNER JOIN stocks s ON s.id = a.stock_id
             INNER JOIN pieces p ON p.id = s.piece_id
             WHERE p.foyer_id = ?1 AND a.quantite <= ?2",
            params![household_id, LOW_STOCK_THRESHOLD],
            |row| row.get(0),
        )
        .map_err(|e| RlmkError::Database(e.to_string()))?;

    Ok(DashboardCounts {
        members: count("SELECT COUNT(*) FROM foyer_membres WHERE foyer_id = ?1")?,
        rooms: count("SELECT COUNT(*) FROM pieces WHERE foyer_id = ?1")?,
        stocks: count(
            "SELECT COUNT(*) FROM stocks s
             INNER JOIN pieces p ON p.id = s.piece_id
             WHERE p.foyer_id = ?1",
        )?,
        food_items: count(
            "SELECT COUNT(*) FROM aliments a
             INNER JOIN stocks s ON s.id = a.stock_id
             INNER JOIN pieces p ON p.id = s.piece_id
             WHERE p.foyer_id = ?1",
        )?,
        low_stock_items,
        expiring_soon,
        plants: count("SELECT COUNT(*) FROM plantes WHERE foyer_id = ?1")?,
        devices: count("SELECT COUNT(*) FROM esp32 WHERE foyer_id = ?1")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::household::Household;
    use crate::models::test_support;

    fn setup() -> (Connection, i64, i64, i64) {
        let conn = test_support::conn();
        let h = Household::new("Maison", None).save(&conn).unwrap();
        let room = Room::new("Cuisine", None, h).save(&conn).unwrap();
        let stock = Stock::new("Frigo", Some("fridge".into()), room).save(&conn).unwrap();
        (conn, h, room, stock)
    }

    fn add_item(conn: &Connection, stock: i64, name: &str, qty: f64, exp: Option<&str>) {
        let mut item = FoodItem::new(name, qty, stock);
        item.expiration_date = exp.map(String::from);
        item.save(conn).unwrap();
    }

    #[test]
    fn test_conditions_number_params() {
        let mut cond = Conditions::default();
        cond.push("a = ?", 1_i64);
        cond.push("b <= ?", 2.0_f64);
        assert_eq!(cond.where_sql(), "WHERE a = ?1 AND b <= ?2");
        assert_eq!(Conditions::default().where_sql(), "");
    }

    #[test]
    fn test_list_rooms_filtered() {
        let (conn, h, _, _) = setup();
        let other = Household::new("Chalet", None).save(&conn).unwrap();
        Room::new("Garage", None, other).save(&conn).unwrap();

        assert_eq!(list_rooms(&conn, Some(h)).unwrap().len(), 1);
        assert_eq!(list_rooms(&conn, None).unwrap().len(), 2);
        assert!(list_rooms(&conn, Some(999)).unwrap().is_empty());
    }

    #[test]
    fn test_list_food_items_low_stock() {
        let (conn, h, _, stock) = setup();
        add_item(&conn, stock, "Lait", 1.0, None);
        add_item(&conn, stock, "Oeufs", 2.0, None);
        add_item(&conn, stock, "Pommes", 6.0, None);

        let filter = FoodItemFilter {
            household_id: Some(h),
            low_stock: true,
            ..Default::default()
        };
        let low = list_food_items(&conn, &filter).unwrap();
        assert_eq!(low.len(), 2);
        assert!(low.iter().all(|f| f.is_low_stock()));

        let by_stock = FoodItemFilter { stock_id: Some(stock), ..Default::default() };
        assert_eq!(list_food_items(&conn, &by_stock).unwrap().len(), 3);
    }

    #[test]
    fn test_list_stocks_by_household() {
        let (conn, h, room, _) = setup();
        let filter = StockFilter { household_id: Some(h), room_id: Some(room) };
        assert_eq!(list_stocks(&conn, &filter).unwrap().len(), 1);
        let filter = StockFilter { household_id: Some(h + 1), room_id: None };
        assert!(list_stocks(&conn, &filter).unwrap().is_empty());
    }

    #[test]
    fn test_dashboard_counts() {
        let (conn, h, _, stock) = setup();
        add_item(&conn, stock, "Lait", 1.0, Some("2024-05-11"));
        add_item(&conn, stock, "Beurre", 3.0, Some("2024-05-01"));
        add_item(&conn, stock, "Riz", 5.0, Some("2024-09-01"));
        add_item(&conn, stock, "Sel", 2.0, None);
        Plant::new("Basilic", h).save(&conn).unwrap();
        Esp32Device::new("Capteur", "aa:aa:aa:aa:aa:aa", Some(h)).save(&conn).unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let counts = dashboard_counts(&conn, h, today).unwrap();
        assert_eq!(
            counts,
            DashboardCounts {
                members: 0,
                rooms: 1,
                stocks: 1,
                food_items: 4,
                low_stock_items: 2,
                expiring_soon: 2,
                plants: 1,
                devices: 1,
            }
        );
    }
}
