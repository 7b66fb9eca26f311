//! Service registry for dependency injection and lifecycle management.
//!
//! The registry holds the database handle and configuration, builds every
//! service from them, initializes them in order and shuts them down in
//! reverse. Route handlers reach services through typed fields.

use tracing::{error, info};

use rlmk_core::config::AppConfig;
use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::api::ServiceHealth;
use rlmk_models::Database;

use crate::auth::AuthService;
use crate::dashboard::DashboardService;
use crate::device::DeviceService;
use crate::household::HouseholdService;
use crate::inventory::InventoryService;
use crate::plant::PlantService;
use crate::room::RoomService;
use crate::service::Service;

/// Central registry of application services.
#[derive(Clone)]
pub struct ServiceRegistry {
    /// Application configuration.
    pub config: AppConfig,
    /// Database connection pool.
    pub database: Database,
    pub auth: AuthService,
    pub households: HouseholdService,
    pub rooms: RoomService,
    pub inventory: InventoryService,
    pub plants: PlantService,
    pub devices: DeviceService,
    pub dashboard: DashboardService,
}

impl ServiceRegistry {
    /// Build all services over a shared database.
    pub fn new(config: AppConfig, database: Database) -> Self {
        Self {
            auth: AuthService::new(database.clone(), config.auth.clone()),
            households: HouseholdService::new(database.clone()),
            rooms: RoomService::new(database.clone()),
            inventory: InventoryService::new(database.clone()),
            plants: PlantService::new(database.clone()),
            devices: DeviceService::new(database.clone()),
            dashboard: DashboardService::new(database.clone()),
            config,
            database,
        }
    }

    /// Services in initialization order.
    fn services_mut(&mut self) -> [&mut dyn Service; 7] {
        [
            &mut self.auth,
            &mut self.households,
            &mut self.rooms,
            &mut self.inventory,
            &mut self.plants,
            &mut self.devices,
            &mut self.dashboard,
        ]
    }

    fn services(&self) -> [&dyn Service; 7] {
        [
            &self.auth,
            &self.households,
            &self.rooms,
            &self.inventory,
            &self.plants,
            &self.devices,
            &self.dashboard,
        ]
    }

    /// Initialize all services in order. Stops at the first failure.
    pub fn init_all(&mut self) -> RlmkResult<()> {
        for svc in self.services_mut() {
            let name = svc.name().to_string();
            if let Err(e) = svc.init() {
                error!("failed to initialize service {name}: {e}");
                return Err(RlmkError::ServiceInit(format!("{name}: {e}")));
            }
        }
        info!("all services initialized");
        Ok(())
    }

    /// Shut down all services in reverse order.
    pub fn shutdown_all(&mut self) {
        for svc in self.services_mut().into_iter().rev() {
            if let Err(e) = svc.shutdown() {
                error!("error shutting down service {}: {e}", svc.name());
            }
        }
        info!("all services shut down");
    }

    /// Per-service state, in initialization order.
    pub fn health_check(&self) -> Vec<ServiceHealth> {
        self.services()
            .into_iter()
            .map(|svc| ServiceHealth {
                name: svc.name().to_string(),
                state: svc.state().to_string(),
                healthy: svc.is_healthy(),
            })
            .collect()
    }

    /// Whether every service is running.
    pub fn is_healthy(&self) -> bool {
        self.services().iter().all(|svc| svc.is_healthy())
    }
}
