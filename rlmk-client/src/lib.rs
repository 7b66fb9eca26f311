//! RLMK Client - HTTP client for the RLMK server REST API.
//!
//! Provides a typed client covering every route group (auth, households,
//! rooms, stocks, food items, plants, devices, dashboard), bearer token
//! injection, retry with exponential backoff, and the locally stored login
//! session used by the terminal front end.

pub mod client;
pub mod endpoints;
pub mod session;

// Re-export key types
pub use client::{ApiClient, RetryConfig};
pub use session::Session;
