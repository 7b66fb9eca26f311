//! ESP32 device registration and reading ingestion.

use tracing::{info, warn};

use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::api::{IngestReadingsRequest, IngestResponse, RegisterDeviceRequest};
use rlmk_models::{queries, Database, Esp32Device, Household, SensorReading};

use crate::service::{simple_service, ServiceState};
use crate::validation::{require, require_text};

#[derive(Clone)]
pub struct DeviceService {
    state: ServiceState,
    database: Database,
}

simple_service!(DeviceService, "device");

impl DeviceService {
    pub fn new(database: Database) -> Self {
        Self {
            state: ServiceState::Created,
            database,
        }
    }

    pub fn list(&self, household_id: Option<i64>) -> RlmkResult<Vec<Esp32Device>> {
        let conn = self.database.conn()?;
        queries::list_devices(&conn, household_id)
    }

    pub fn register(&self, req: RegisterDeviceRequest) -> RlmkResult<Esp32Device> {
        let name = require_text(req.name, "name")?;
        let mac = require_text(req.mac_address, "macAddress")?;

        let conn = self.database.conn()?;
        if let Some(household_id) = req.household_id {
            if !Household::exists(&conn, household_id)? {
                return Err(RlmkError::not_found("Household"));
            }
        }

        let mut device = Esp32Device::new(name, &mac, req.household_id);
        device.save(&conn)?;
        info!("registered device {} ({:?})", device.mac_address, device.id);
        Ok(device)
    }

    /// Store a batch of readings from a device identified by MAC address and
    /// mark the device as seen. The batch is all-or-nothing.
    pub fn ingest(&self, req: IngestReadingsRequest) -> RlmkResult<IngestResponse> {
        let mac = require_text(req.mac_address, "macAddress")?;
        let inputs = require(req.readings, "readings")?;
        if inputs.is_empty() {
            return Err(RlmkError::validation("readings must not be empty"));
        }

        let mut readings = Vec::with_capacity(inputs.len());
        for input in inputs {
            let reading_type = require_text(input.reading_type, "type")?;
            let value = require(input.value, "value")?;
            if !value.is_finite() {
                return Err(RlmkError::validation("value must be a number"));
            }
            readings.push((reading_type, value));
        }

        let (device_id, stored, last_seen) = self.database.transaction(|conn| {
            let device = Esp32Device::find_by_mac(conn, &mac)?.ok_or_else(|| {
                warn!("readings from unknown device {mac}");
                RlmkError::not_found("Device")
            })?;
            let device_id = device
                .id
                .ok_or_else(|| RlmkError::Internal("stored device without id".into()))?;

            for (reading_type, value) in &readings {
                SensorReading::new(device_id, reading_type.as_str(), *value).save(conn)?;
            }
            let last_seen = Esp32Device::touch(conn, device_id)?;
            Ok((device_id, readings.len(), last_seen))
        })?;

        info!("stored {stored} readings from device {device_id}");
        Ok(IngestResponse {
            device_id,
            stored,
            last_seen,
        })
    }
}
