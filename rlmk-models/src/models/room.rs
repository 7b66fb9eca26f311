//! Room ("pièce") entity model.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, Row};
use rlmk_core::error::{RlmkError, RlmkResult};

/// A room within a household.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Option<i64>,
    pub name: String,
    pub room_type: Option<String>,
    pub household_id: i64,
}

impl Room {
    /// Create an unsaved room.
    pub fn new(name: impl Into<String>, room_type: Option<String>, household_id: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            room_type,
            household_id,
        }
    }

    /// Construct a Room from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("nom")?,
            room_type: row.get("type_piece")?,
            household_id: row.get("foyer_id")?,
        })
    }

    /// Find a room by ID.
    pub fn find_by_id(conn: &Connection, id: i64) -> RlmkResult<Option<Self>> {
        match conn.query_row("SELECT * FROM pieces WHERE id = ?1", [id], Self::from_row) {
            Ok(r) => Ok(Some(r)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RlmkError::Database(e.to_string())),
        }
    }

    /// Insert this room. Returns the new ID.
    pub fn save(&mut self, conn: &Connection) -> RlmkResult<i64> {
        conn.execute(
            "INSERT INTO pieces (nom, type_piece, foyer_id) VALUES (?1, ?2, ?3)",
            params![self.name, self.room_type, self.household_id],
        )
        .map_err(|e| RlmkError::Database(e.to_string()))?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Write back name and type. Returns false when the row does not exist.
    pub fn update(&self, conn: &Connection) -> RlmkResult<bool> {
        let id = self.id.ok_or_else(|| RlmkError::Database("room has no id for update".into()))?;
        let changed = conn
            .execute(
                "UPDATE pieces SET nom = ?1, type_piece = ?2 WHERE id = ?3",
                params![self.name, self.room_type, id],
            )
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }

    /// Delete a room with its stocks and their food items.
    pub fn delete(conn: &Connection, id: i64) -> RlmkResult<bool> {
        let changed = conn
            .execute("DELETE FROM pieces WHERE id = ?1", [id])
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }
}
