//! RLMK Services - Business logic and service layer.
//!
//! This crate provides the service trait, the service registry, and the
//! concrete services behind every REST route:
//! - Authentication (bcrypt passwords, HS256 session tokens)
//! - Households and membership roles
//! - Rooms, stocks, and food items
//! - Plants and their normalized sensor history
//! - ESP32 device registration and reading ingestion
//! - Dashboard aggregate counts
//! - Sample data seeding

pub mod service;
pub mod registry;
pub mod validation;
pub mod auth;
pub mod household;
pub mod room;
pub mod inventory;
pub mod plant;
pub mod device;
pub mod dashboard;
pub mod seed;

// Re-export key types
pub use service::{Service, ServiceState};
pub use registry::ServiceRegistry;
pub use auth::{AuthService, Claims};
pub use household::HouseholdService;
pub use room::RoomService;
pub use inventory::InventoryService;
pub use plant::{normalize_soil_moisture, PlantService, SensorKind};
pub use device::DeviceService;
pub use dashboard::DashboardService;
pub use seed::{seed_sample_household, SeedSummary};
