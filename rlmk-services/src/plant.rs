//! Plant management and sensor history.
//!
//! Devices report free-form reading labels. The history groups them into
//! three series by label and converts raw soil-moisture values, which rise as
//! the soil dries, into a moisture percentage.

use tracing::{debug, info};

use rlmk_core::constants::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::api::{CreatePlantRequest, HistoryPoint, LatestValues, PlantHistory, PlantPatch};
use rlmk_models::{queries, Database, Esp32Device, Household, Plant, Room, SensorReading};

use crate::service::{simple_service, ServiceState};
use crate::validation::{optional_text, require, require_text};

/// The series a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    SoilMoisture,
    Temperature,
    Light,
}

impl SensorKind {
    /// Classify a reading label, case-insensitively. Unknown labels are `None`.
    pub fn classify(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        if matches!(label.as_str(), "humidity" | "humidite" | "humidité")
            || ["soil", "moisture", "sol", "humid"].iter().any(|k| label.contains(k))
        {
            Some(Self::SoilMoisture)
        } else if label.contains("temp") {
            Some(Self::Temperature)
        } else if ["light", "lum", "lux"].iter().any(|k| label.contains(k)) {
            Some(Self::Light)
        } else {
            None
        }
    }

    /// Transform a raw value for display. Only soil moisture is rescaled.
    pub fn normalize(self, value: f64) -> f64 {
        match self {
            Self::SoilMoisture => normalize_soil_moisture(value),
            Self::Temperature | Self::Light => value,
        }
    }
}

/// `clamp(100 - raw, 0, 100)`.
pub fn normalize_soil_moisture(raw: f64) -> f64 {
    (100.0 - raw).clamp(0.0, 100.0)
}

/// Clamp a requested history length into `1..=MAX_HISTORY_LIMIT`.
pub fn history_limit(requested: Option<i64>) -> i64 {
    requested.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, MAX_HISTORY_LIMIT)
}

/// Group readings (newest first) into the three series.
pub fn build_history(plant_id: i64, device_id: Option<i64>, readings: &[SensorReading]) -> PlantHistory {
    let mut history = PlantHistory {
        plant_id,
        device_id,
        soil_moisture: Vec::new(),
        temperature: Vec::new(),
        light: Vec::new(),
        latest: LatestValues::default(),
    };

    for reading in readings {
        let Some(kind) = SensorKind::classify(&reading.reading_type) else {
            continue;
        };
        let point = HistoryPoint {
            value: kind.normalize(reading.value),
            timestamp: reading.timestamp.clone(),
        };
        match kind {
            SensorKind::SoilMoisture => history.soil_moisture.push(point),
            SensorKind::Temperature => history.temperature.push(point),
            SensorKind::Light => history.light.push(point),
        }
    }

    history.latest = LatestValues {
        soil_moisture: history.soil_moisture.first().map(|p| p.value),
        temperature: history.temperature.first().map(|p| p.value),
        light: history.light.first().map(|p| p.value),
    };
    history
}

#[derive(Clone)]
pub struct PlantService {
    state: ServiceState,
    database: Database,
}

simple_service!(PlantService, "plant");

impl PlantService {
    pub fn new(database: Database) -> Self {
        Self {
            state: ServiceState::Created,
            database,
        }
    }

    pub fn list(&self, household_id: Option<i64>) -> RlmkResult<Vec<Plant>> {
        let conn = self.database.conn()?;
        queries::list_plants(&conn, household_id)
    }

    fn check_links(
        conn: &rusqlite::Connection,
        room_id: Option<i64>,
        device_id: Option<i64>,
    ) -> RlmkResult<()> {
        if let Some(room_id) = room_id {
            if Room::find_by_id(conn, room_id)?.is_none() {
                return Err(RlmkError::not_found("Room"));
            }
        }
        if let Some(device_id) = device_id {
            if Esp32Device::find_by_id(conn, device_id)?.is_none() {
                return Err(RlmkError::not_found("Device"));
            }
        }
        Ok(())
    }

    pub fn create(&self, req: CreatePlantRequest) -> RlmkResult<Plant> {
        let name = require_text(req.name, "name")?;
        let household_id = require(req.household_id, "householdId")?;

        let conn = self.database.conn()?;
        if !Household::exists(&conn, household_id)? {
            return Err(RlmkError::not_found("Household"));
        }
        Self::check_links(&conn, req.room_id, req.device_id)?;

        let mut plant = Plant::new(name, household_id);
        plant.species = optional_text(req.species);
        plant.room_id = req.room_id;
        plant.device_id = req.device_id;
        plant.moisture_threshold = req.moisture_threshold;
        plant.save(&conn)?;
        info!("created plant {:?} in household {household_id}", plant.id);
        Ok(plant)
    }

    pub fn update(&self, id: i64, patch: PlantPatch) -> RlmkResult<Plant> {
        let conn = self.database.conn()?;
        let mut plant = Plant::find_by_id(&conn, id)?.ok_or_else(|| RlmkError::not_found("Plant"))?;
        Self::check_links(&conn, patch.room_id, patch.device_id)?;

        if let Some(name) = patch.name {
            plant.name = require_text(Some(name), "name")?;
        }
        if patch.species.is_some() {
            plant.species = optional_text(patch.species);
        }
        if patch.room_id.is_some() {
            plant.room_id = patch.room_id;
        }
        if patch.device_id.is_some() {
            plant.device_id = patch.device_id;
        }
        if patch.moisture_threshold.is_some() {
            plant.moisture_threshold = patch.moisture_threshold;
        }

        if !plant.update(&conn)? {
            return Err(RlmkError::not_found("Plant"));
        }
        Ok(plant)
    }

    pub fn delete(&self, id: i64) -> RlmkResult<()> {
        let conn = self.database.conn()?;
        if !Plant::delete(&conn, id)? {
            return Err(RlmkError::not_found("Plant"));
        }
        info!("deleted plant {id}");
        Ok(())
    }

    /// Sensor history from the plant's linked device, newest first.
    pub fn history(&self, id: i64, limit: Option<i64>) -> RlmkResult<PlantHistory> {
        let conn = self.database.conn()?;
        let plant = Plant::find_by_id(&conn, id)?.ok_or_else(|| RlmkError::not_found("Plant"))?;

        let readings = match plant.device_id {
            Some(device_id) => SensorReading::recent_for_device(&conn, device_id, history_limit(limit))?,
            None => Vec::new(),
        };
        debug!("plant {id}: {} readings in history window", readings.len());

        Ok(build_history(id, plant.device_id, &readings))
    }
}
