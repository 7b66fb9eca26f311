//! Overview aggregate for a household.

use chrono::Utc;

use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::queries::{self, DashboardCounts};
use rlmk_models::{Database, Household};

use crate::service::{simple_service, ServiceState};
use crate::validation::require;

#[derive(Clone)]
pub struct DashboardService {
    state: ServiceState,
    database: Database,
}

simple_service!(DashboardService, "dashboard");

impl DashboardService {
    pub fn new(database: Database) -> Self {
        Self {
            state: ServiceState::Created,
            database,
        }
    }

    /// Row counts for the household, with "expiring soon" anchored on today (UTC).
    pub fn overview(&self, household_id: Option<i64>) -> RlmkResult<DashboardCounts> {
        let household_id = require(household_id, "householdId")?;
        let conn = self.database.conn()?;
        if !Household::exists(&conn, household_id)? {
            return Err(RlmkError::not_found("Household"));
        }
        queries::dashboard_counts(&conn, household_id, Utc::now().date_naive())
    }
}
