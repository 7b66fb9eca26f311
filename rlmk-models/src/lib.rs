//! RLMK Models - Database schema, models, migrations, and query helpers.
//!
//! This crate owns all data persistence: SQLite database initialization,
//! entity models mapping the French storage columns onto English API
//! fields, versioned migrations, and filtered listings for the route layer.

pub mod api;
pub mod db;
pub mod schema;
pub mod models;
pub mod queries;
pub mod migrations;

// Re-export key types
pub use db::{Database, DatabaseStats};
pub use models::household::Household;
pub use models::user::User;
pub use models::membership::{Member, Membership, UserHousehold};
pub use models::room::Room;
pub use models::stock::Stock;
pub use models::food_item::FoodItem;
pub use models::plant::Plant;
pub use models::device::Esp32Device;
pub use models::sensor_reading::SensorReading;
