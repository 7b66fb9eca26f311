//! ESP32 sensor device entity model.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, Row};
use rlmk_core::error::{RlmkError, RlmkResult};

use super::{is_constraint_violation, now_timestamp};

/// An ESP32 microcontroller that reports sensor readings, identified by MAC address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Esp32Device {
    pub id: Option<i64>,
    pub name: String,
    pub mac_address: String,
    pub household_id: Option<i64>,
    pub last_seen: Option<String>,
}

impl Esp32Device {
    /// Create an unsaved device. The MAC address is normalized.
    pub fn new(name: impl Into<String>, mac_address: &str, household_id: Option<i64>) -> Self {
        Self {
            id: None,
            name: name.into(),
            mac_address: normalize_mac(mac_address),
            household_id,
            last_seen: None,
        }
    }

    /// Construct a device from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("nom")?,
            mac_address: row.get("adresse_mac")?,
            household_id: row.get("foyer_id")?,
            last_seen: row.get("derniere_connexion")?,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> RlmkResult<Option<Self>> {
        match conn.query_row("SELECT * FROM esp32 WHERE id = ?1", [id], Self::from_row) {
            Ok(d) => Ok(Some(d)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RlmkError::Database(e.to_string())),
        }
    }

    /// Find a device by MAC address (case-insensitive).
    pub fn find_by_mac(conn: &Connection, mac_address: &str) -> RlmkResult<Option<Self>> {
        match conn.query_row(
            "SELECT * FROM esp32 WHERE adresse_mac = ?1",
            [normalize_mac(mac_address)],
            Self::from_row,
        ) {
            Ok(d) => Ok(Some(d)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RlmkError::Database(e.to_string())),
        }
    }

    /// Insert this device. A MAC address already registered is a validation error.
    pub fn save(&mut self, conn: &Connection) -> RlmkResult<i64> {
        conn.execute(
            "INSERT INTO esp32 (nom, adresse_mac, foyer_id, derniere_connexion)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.name, self.mac_address, self.household_id, self.last_seen],
        )
        .map_err(|e| {
            if is_constraint_violation(&e) {
                RlmkError::validation("Device already registered")
            } else {
                RlmkError::Database(e.to_string())
            }
        })?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Record that the device just reported.
    pub fn touch(conn: &Connection, id: i64) -> RlmkResult<String> {
        let now = now_timestamp();
        conn.execute(
            "UPDATE esp32 SET derniere_connexion = ?1 WHERE id = ?2",
            params![now, id],
        )
        .map_err(|e| RlmkError::Database(e.to_string()))?;
        Ok(now)
    }
}

/// Uppercase a MAC address and use `:` separators.
pub fn normalize_mac(mac: &str) -> String {
    mac.trim().replace('-', ":").to_uppercase()
}
