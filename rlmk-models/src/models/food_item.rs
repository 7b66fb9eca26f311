//! Food item ("aliment") entity model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, Row};
use rlmk_core::constants::{EXPIRING_SOON_DAYS, LOW_STOCK_THRESHOLD};
use rlmk_core::error::{RlmkError, RlmkResult};

use super::now_timestamp;

/// A food item held in a stock.
///
/// `expiration_date` is a calendar date (`YYYY-MM-DD`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: Option<i64>,
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiration_date: Option<String>,
    pub stock_id: i64,
    pub added_at: String,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, quantity: f64, stock_id: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity,
            unit: None,
            category: None,
            expiration_date: None,
            stock_id,
            added_at: now_timestamp(),
        }
    }

    /// Construct a FoodItem from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("nom")?,
            quantity: row.get("quantite")?,
            unit: row.get("unite")?,
            category: row.get("categorie")?,
            expiration_date: row.get("date_peremption")?,
            stock_id: row.get("stock_id")?,
            added_at: row.get("date_ajout")?,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> RlmkResult<Option<Self>> {
        match conn.query_row("SELECT * FROM aliments WHERE id = ?1", [id], Self::from_row) {
            Ok(f) => Ok(Some(f)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RlmkError::Database(e.to_string())),
        }
    }

    pub fn save(&mut self, conn: &Connection) -> RlmkResult<i64> {
        conn.execute(
            "INSERT INTO aliments (nom, quantite, unite, categorie, date_peremption, stock_id, date_ajout)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                self.name,
                self.quantity,
                self.unit,
                self.category,
                self.expiration_date,
                self.stock_id,
                self.added_at,
            ],
        )
        .map_err(|e| RlmkError::Database(e.to_string()))?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    pub fn update(&self, conn: &Connection) -> RlmkResult<bool> {
        let id = self.id.ok_or_else(|| RlmkError::Database("food item has no id for update".into()))?;
        let changed = conn
            .execute(
                "UPDATE aliments SET nom = ?1, quantite = ?2, unite = ?3, categorie = ?4,
                    date_peremption = ?5, stock_id = ?6
                 WHERE id = ?7",
                params![
                    self.name,
                    self.quantity,
                    self.unit,
                    self.category,
                    self.expiration_date,
                    self.stock_id,
                    id,
                ],
            )
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }

    pub fn delete(conn: &Connection, id: i64) -> RlmkResult<bool> {
        let changed = conn
            .execute("DELETE FROM aliments WHERE id = ?1", [id])
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }

    // ─── Computed properties ─────────────────────────────────────────────

    /// Whether the quantity is at or below the low-stock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= LOW_STOCK_THRESHOLD
    }

    /// Whether the item expires within the "expiring soon" window of `today`
    /// (already expired items included). Items without a parseable date never do.
    pub fn is_expiring_soon(&self, today: NaiveDate) -> bool {
        match self.expiration_date.as_deref().and_then(parse_date) {
            Some(date) => date <= today + chrono::Duration::days(EXPIRING_SOON_DAYS),
            None => false,
        }
    }
}

/// Parse a `YYYY-MM-DD` date, also accepting a full RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, expiration: Option<&str>) -> FoodItem {
        let mut f = FoodItem::new("Lait", quantity, 1);
        f.expiration_date = expiration.map(String::from);
        f
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(item(2.0, None).is_low_stock());
        assert!(item(0.0, None).is_low_stock());
        assert!(!item(2.5, None).is_low_stock());
    }

    #[test]
    fn test_expiring_soon() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert!(item(1.0, Some("2024-05-13")).is_expiring_soon(today));
        assert!(item(1.0, Some("2024-05-01")).is_expiring_soon(today));
        assert!(!item(1.0, Some("2024-05-14")).is_expiring_soon(today));
        assert!(!item(1.0, None).is_expiring_soon(today));
        assert!(!item(1.0, Some("soon")).is_expiring_soon(today));
    }

    #[test]
    fn test_parse_date_accepts_timestamp() {
        assert_eq!(
            parse_date("2024-05-13T08:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 5, 13)
        );
    }
}
