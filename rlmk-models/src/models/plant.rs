//! Plant ("plante") entity model.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, Row};
use rlmk_core::error::{RlmkError, RlmkResult};

use super::now_timestamp;

/// A monitored plant, optionally placed in a room and linked to a sensor device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: Option<i64>,
    pub name: String,
    pub species: Option<String>,
    pub household_id: i64,
    pub room_id: Option<i64>,
    pub device_id: Option<i64>,
    /// Soil moisture percentage below which the plant needs water.
    pub moisture_threshold: Option<f64>,
    pub created_at: String,
}

impl Plant {
    pub fn new(name: impl Into<String>, household_id: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            species: None,
            household_id,
            room_id: None,
            device_id: None,
            moisture_threshold: None,
            created_at: now_timestamp(),
        }
    }

    /// Construct a Plant from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("nom")?,
            species: row.get("espece")?,
            household_id: row.get("foyer_id")?,
            room_id: row.get("piece_id")?,
            device_id: row.get("esp32_id")?,
            moisture_threshold: row.get("seuil_humidite")?,
            created_at: row.get("date_creation")?,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> RlmkResult<Option<Self>> {
        match conn.query_row("SELECT * FROM plantes WHERE id = ?1", [id], Self::from_row) {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RlmkError::Database(e.to_string())),
        }
    }

    pub fn save(&mut self, conn: &Connection) -> RlmkResult<i64> {
        conn.execute(
            "INSERT INTO plantes (nom, espece, foyer_id, piece_id, esp32_id, seuil_humidite, date_creation)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                self.name,
                self.species,
                self.household_id,
                self.room_id,
                self.device_id,
                self.moisture_threshold,
                self.created_at,
            ],
        )
        .map_err(|e| RlmkError::Database(e.to_string()))?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    pub fn update(&self, conn: &Connection) -> RlmkResult<bool> {
        let id = self.id.ok_or_else(|| RlmkError::Database("plant has no id for update".into()))?;
        let changed = conn
            .execute(
                "UPDATE plantes SET nom = ?1, espece = ?2, piece_id = ?3, esp32_id = ?4,
                    seuil_humidite = ?5
                 WHERE id = ?6",
                params![
                    self.name,
                    self.species,
                    self.room_id,
                    self.device_id,
                    self.moisture_threshold,
                    id,
                ],
            )
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }

    pub fn delete(conn: &Connection, id: i64) -> RlmkResult<bool> {
        let changed = conn
            .execute("DELETE FROM plantes WHERE id = ?1", [id])
            .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::household::Household;
    use crate::models::room::Room;
    use crate::models::test_support;

    #[test]
    fn test_room_delete_unlinks_plant() {
        let conn = test_support::conn();
        let h = Household::new("Maison", None).save(&conn).unwrap();
        let room = Room::new("Salon", None, h).save(&conn).unwrap();

        let mut plant = Plant::new("Monstera", h);
        plant.room_id = Some(room);
        plant.moisture_threshold = Some(30.0);
        let id = plant.save(&conn).unwrap();

        Room::delete(&conn, room).unwrap();
        let found = Plant::find_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(found.room_id, None);
        assert_eq!(found.moisture_threshold, Some(30.0));
    }
}
