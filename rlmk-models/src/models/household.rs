//! Household ("foyer") entity model.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, Row};
use rlmk_core::error::{RlmkError, RlmkResult};

use super::now_timestamp;

/// A household, the multi-tenancy boundary. Rooms, plants, and devices
/// belong to exactly one household.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub id: Option<i64>,
    pub name: String,
    pub address: Option<String>,
    pub created_at: String,
}

impl Household {
    /// Create an unsaved household.
    pub fn new(name: impl Into<String>, address: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            address,
            created_at: now_timestamp(),
        }
    }

    /// Construct a Household from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("nom")?,
            address: row.get("adresse")?,
            created_at: row.get("date_creation")?,
        })
    }

    /// Find a household by ID.
    pub fn find_by_id(conn: &Connection, id: i64) -> RlmkResult<Option<Self>> {
        match conn.query_row("SELECT * FROM foyers WHERE id = ?1", [id], Self::from_row) {
            Ok(h) => Ok(Some(h)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RlmkError::Database(e.to_string())),
        }
    }

    /// Whether a household with this ID exists.
    pub fn exists(conn: &Connection, id: i64) -> RlmkResult<bool> {
        conn.query_row("SELECT EXISTS(SELECT 1 FROM foyers WHERE id = ?1)", [id], |row| {
            row.get(0)
        })
        .map_err(|e| RlmkError::Database(e.to_string()))
    }

    /// Insert this household. Returns the new ID.
    pub fn save(&mut self, conn: &Connection) -> RlmkResult<i64> {
        conn.execute(
            "INSERT INTO foyers (nom, adresse, date_creation) VALUES (?1, ?2, ?3)",
            params![self.name, self.address, self.created_at],
        )
        .map_err(|e| RlmkError::Database(e.to_string()))?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Update name and address. Returns false when the row does not exist.
    pub fn update(&self, conn: &Connection) -> RlmkResult<bool> {
        let id = self.id.ok_or_else(|| RlmkError::Database("household has no id for update".into()))?;
        let changed = conn
            .execute(
                "UPDATE foyers SET nom = ?1, adresse = ?2 WHERE id = ?3",
                params![self.name, self.address, id],
            )
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }

    /// Delete a household and, through cascades, everything it owns.
    pub fn delete(conn: &Connection, id: i64) -> RlmkResult<bool> {
        let changed = conn
            .execute("DELETE FROM foyers WHERE id = ?1", [id])
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }
}
