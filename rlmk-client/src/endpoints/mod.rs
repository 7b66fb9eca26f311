//! API endpoint modules organized by route group.
//!
//! Each module adds typed methods to `ApiClient` for one group of routes.

pub mod auth;
pub mod households;
pub mod rooms;
pub mod inventory;
pub mod plants;
pub mod devices;
pub mod dashboard;
