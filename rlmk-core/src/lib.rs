//! RLMK Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by all other RLMK crates:
//! - Application configuration (server bind, JWT secret, database, client)
//! - Global error type covering all error categories
//! - Structured logging with tracing
//! - Platform data/config directories
//! - Common constants

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{RlmkError, RlmkResult};
pub use logging::init_logging;
pub use platform::Platform;
