//! Stock entity model: a storage location (fridge, pantry) inside a room.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, Row};
use rlmk_core::error::{RlmkError, RlmkResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: Option<i64>,
    pub name: String,
    pub stock_type: Option<String>,
    pub room_id: i64,
}

impl Stock {
    pub fn new(name: impl Into<String>, stock_type: Option<String>, room_id: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            stock_type,
            room_id,
        }
    }

    /// Construct a Stock from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("nom")?,
            stock_type: row.get("type_stock")?,
            room_id: row.get("piece_id")?,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> RlmkResult<Option<Self>> {
        match conn.query_row("SELECT * FROM stocks WHERE id = ?1", [id], Self::from_row) {
            Ok(s) => Ok(Some(s)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RlmkError::Database(e.to_string())),
        }
    }

    pub fn save(&mut self, conn: &Connection) -> RlmkResult<i64> {
        conn.execute(
            "INSERT INTO stocks (nom, type_stock, piece_id) VALUES (?1, ?2, ?3)",
            params![self.name, self.stock_type, self.room_id],
        )
        .map_err(|e| RlmkError::Database(e.to_string()))?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Write back all mutable fields, including a move to another room.
    pub fn update(&self, conn: &Connection) -> RlmkResult<bool> {
        let id = self.id.ok_or_else(|| RlmkError::Database("stock has no id for update".into()))?;
        let changed = conn
            .execute(
                "UPDATE stocks SET nom = ?1, type_stock = ?2, piece_id = ?3 WHERE id = ?4",
                params![self.name, self.stock_type, self.room_id, id],
            )
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }

    pub fn delete(conn: &Connection, id: i64) -> RlmkResult<bool> {
        let changed = conn
            .execute("DELETE FROM stocks WHERE id = ?1", [id])
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }
}
