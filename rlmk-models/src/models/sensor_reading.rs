//! Sensor reading ("mesure") entity model.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, Row};
use rlmk_core::error::{RlmkError, RlmkResult};

use super::now_timestamp;

/// A raw value reported by a device. `type` is a free-form label such as
/// `humidity`, `temperature` or `light`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub id: Option<i64>,
    pub device_id: i64,
    #[serde(rename = "type")]
    pub reading_type: String,
    pub value: f64,
    pub timestamp: String,
}

impl SensorReading {
    pub fn new(device_id: i64, reading_type: impl Into<String>, value: f64) -> Self {
        Self {
            id: None,
            device_id,
            reading_type: reading_type.into(),
            value,
            timestamp: now_timestamp(),
        }
    }

    /// Construct a SensorReading from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            device_id: row.get("esp32_id")?,
            reading_type: row.get("type")?,
            value: row.get("valeur")?,
            timestamp: row.get("date_mesure")?,
        })
    }

    pub fn save(&mut self, conn: &Connection) -> RlmkResult<i64> {
        conn.execute(
            "INSERT INTO mesures (esp32_id, type, valeur, date_mesure) VALUES (?1, ?2, ?3, ?4)",
            params![self.device_id, self.reading_type, self.value, self.timestamp],
        )
        .map_err(|e| RlmkError::Database(e.to_string()))?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Most recent readings of a device, newest first.
    pub fn recent_for_device(conn: &Connection, device_id: i64, limit: i64) -> RlmkResult<Vec<Self>> {
        let mut stmt = conn
            .prepare(
                "SELECT * FROM mesures WHERE esp32_id = ?1
                 ORDER BY date_mesure DESC, id DESC
                 LIMIT ?2",
            )
            .map_err(|e| RlmkError::Database(e.to_string()))?;

        let readings = stmt
            .query_map(params![device_id, limit], Self::from_row)
            .map_err(|e| RlmkError::Database(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| RlmkError::Database(e.to_string()))?;

        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::device::Esp32Device;
    use crate::models::test_support;

    #[test]
    fn test_recent_newest_first_with_limit() {
        let conn = test_support::conn();
        let dev = Esp32Device::new("Capteur", "01:02:03:04:05:06", None).save(&conn).unwrap();

        for (i, ts) in ["2024-05-01T10:00:00Z", "2024-05-01T12:00:00Z", "2024-05-01T11:00:00Z"]
            .iter()
            .enumerate()
        {
            let mut r = SensorReading::new(dev, "humidity", i as f64);
            r.timestamp = ts.to_string();
            r.save(&conn).unwrap();
        }

        let recent = SensorReading::recent_for_device(&conn, dev, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].timestamp, "2024-05-01T12:00:00Z");
        assert_eq!(recent[1].timestamp, "2024-05-01T11:00:00Z");
    }

    #[test]
    fn test_type_field_name() {
        let json = serde_json::to_value(SensorReading::new(1, "light", 420.0)).unwrap();
        assert_eq!(json["type"], "light");
        assert_eq!(json["deviceId"], 1);
    }
}
