//! Room management.

use tracing::info;

use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::api::{CreateRoomRequest, RoomPatch};
use rlmk_models::{queries, Database, Household, Room};

use crate::service::{simple_service, ServiceState};
use crate::validation::{optional_text, require, require_text};

#[derive(Clone)]
pub struct RoomService {
    state: ServiceState,
    database: Database,
}

simple_service!(RoomService, "room");

impl RoomService {
    pub fn new(database: Database) -> Self {
        Self {
            state: ServiceState::Created,
            database,
        }
    }

    pub fn list(&self, household_id: Option<i64>) -> RlmkResult<Vec<Room>> {
        let conn = self.database.conn()?;
        queries::list_rooms(&conn, household_id)
    }

    pub fn create(&self, req: CreateRoomRequest) -> RlmkResult<Room> {
        let name = require_text(req.name, "name")?;
        let household_id = require(req.household_id, "householdId")?;

        let conn = self.database.conn()?;
        if !Household::exists(&conn, household_id)? {
            return Err(RlmkError::not_found("Household"));
        }

        let mut room = Room::new(name, optional_text(req.room_type), household_id);
        room.save(&conn)?;
        info!("created room {:?} in household {household_id}", room.id);
        Ok(room)
    }

    /// Apply the fields present in `patch`.
    pub fn update(&self, id: i64, patch: RoomPatch) -> RlmkResult<Room> {
        let conn = self.database.conn()?;
        let mut room = Room::find_by_id(&conn, id)?.ok_or_else(|| RlmkError::not_found("Room"))?;

        if let Some(name) = patch.name {
            room.name = require_text(Some(name), "name")?;
        }
        if patch.room_type.is_some() {
            room.room_type = optional_text(patch.room_type);
        }

        if !room.update(&conn)? {
            return Err(RlmkError::not_found("Room"));
        }
        Ok(room)
    }

    pub fn delete(&self, id: i64) -> RlmkResult<()> {
        let conn = self.database.conn()?;
        if !Room::delete(&conn, id)? {
            return Err(RlmkError::not_found("Room"));
        }
        info!("deleted room {id}");
        Ok(())
    }
}
