//! Global error types for RLMK.
//!
//! All error categories across the application are unified into a single
//! `RlmkError` enum. Library errors (rusqlite, r2d2, bcrypt, jsonwebtoken,
//! reqwest) are mapped at the call site into the matching variant.

use thiserror::Error;

/// Convenience type alias for Results using RlmkError.
pub type RlmkResult<T> = Result<T, RlmkError>;

/// Unified error type covering all error categories in RLMK.
#[derive(Error, Debug)]
pub enum RlmkError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Database errors --
    /// SQLite database error.
    #[error("database error: {0}")]
    Database(String),

    /// Database migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Database connection pool error.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Database integrity check failed.
    #[error("database integrity check failed: {0}")]
    IntegrityCheck(String),

    // -- Request errors --
    /// A required field is missing or a value is out of range.
    #[error("{0}")]
    Validation(String),

    /// The targeted row does not exist.
    #[error("{0} not found")]
    NotFound(String),

    // -- Auth errors --
    /// Credentials were rejected.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// A bearer token is missing, malformed, expired, or badly signed.
    #[error("invalid token: {0}")]
    Token(String),

    /// Password hashing failed.
    #[error("crypto error: {0}")]
    Crypto(String),

    // -- Network errors (client side) --
    /// HTTP request failed.
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Server returned an error response.
    #[error("server error (status {status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Error message from server.
        message: String,
    },

    /// No local session; the user must log in first.
    #[error("not logged in")]
    NotLoggedIn,

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Service errors --
    /// A service failed to initialize.
    #[error("service init error: {0}")]
    ServiceInit(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RlmkError {
    /// Shorthand for a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        RlmkError::Validation(msg.into())
    }

    /// Shorthand for a not-found error naming the missing entity.
    pub fn not_found(what: impl Into<String>) -> Self {
        RlmkError::NotFound(what.into())
    }
}

impl From<serde_json::Error> for RlmkError {
    fn from(e: serde_json::Error) -> Self {
        RlmkError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for RlmkError {
    fn from(e: toml::de::Error) -> Self {
        RlmkError::Config(e.to_string())
    }
}
