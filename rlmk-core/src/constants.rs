//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "RLMK";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path prefix of every REST route.
pub const API_PREFIX: &str = "/api";

/// Database schema version.
pub const DB_SCHEMA_VERSION: i32 = 1;

/// Food items at or below this quantity count as low stock.
pub const LOW_STOCK_THRESHOLD: f64 = 2.0;

/// Days ahead an expiration date counts as "expiring soon".
pub const EXPIRING_SOON_DAYS: i64 = 3;

/// Default and maximum number of readings returned by the plant history.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;
pub const MAX_HISTORY_LIMIT: i64 = 500;

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Message returned to callers for any unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Household membership roles.
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const MEMBER: &str = "member";

    /// All valid roles.
    pub const ALL: &[&str] = &[ADMIN, MEMBER];

    /// Whether `role` is one of the accepted membership roles.
    pub fn is_valid(role: &str) -> bool {
        ALL.contains(&role)
    }
}
