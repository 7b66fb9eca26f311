//! Application configuration management.
//!
//! Handles loading, saving, and accessing application configuration: HTTP
//! server bind settings, the JWT secret, database, logging, and the API URL
//! used by the terminal client. Configuration is persisted as TOML on disk;
//! environment variables override the file after loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use base64::Engine;
use rand::Rng;
use tokio::sync::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RlmkError, RlmkResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Token signing and password hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Terminal client settings.
    #[serde(default)]
    pub client: ClientConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (e.g. "0.0.0.0").
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret for signing session tokens.
    #[serde(default)]
    pub jwt_secret: String,

    /// Session token lifetime in days.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,

    /// bcrypt work factor for new password hashes.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. If empty, uses default location.
    #[serde(default)]
    pub path: String,

    /// Enable WAL (Write-Ahead Logging) mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,

    /// Maximum number of connections in the pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Run integrity check on startup.
    #[serde(default = "default_true")]
    pub integrity_check_on_startup: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

/// Terminal client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the RLMK server (e.g. "http://localhost:3000").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API request timeout in milliseconds.
    #[serde(default = "default_api_timeout")]
    pub api_timeout_ms: u64,
}

// Default value functions for serde

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_token_ttl_days() -> i64 {
    7
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_pool_size() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_api_timeout() -> u64 {
    30_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_days: default_token_ttl_days(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            wal_mode: true,
            pool_size: default_pool_size(),
            integrity_check_on_startup: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_timeout_ms: default_api_timeout(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or the default config path when `None`, then apply
    /// environment overrides. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> RlmkResult<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::load`], with overrides taken from `lookup`.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> RlmkResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };
        let mut config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            debug!("no config file at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_overrides_from(lookup);
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> RlmkResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> RlmkResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RlmkError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> RlmkResult<PathBuf> {
        let config_dir = Platform::config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the effective database path, using the configured path or the default.
    pub fn effective_db_path(&self) -> RlmkResult<PathBuf> {
        if self.database.path.is_empty() {
            let data_dir = Platform::data_dir()?;
            Ok(data_dir.join("rlmk.db"))
        } else {
            Ok(PathBuf::from(&self.database.path))
        }
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> RlmkResult<PathBuf> {
        if self.logging.directory.is_empty() {
            let data_dir = Platform::data_dir()?;
            Ok(data_dir.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Apply `RLMK_*` overrides read through `lookup`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("RLMK_JWT_SECRET").or_else(|| lookup("JWT_SECRET")) {
            debug!("jwt secret taken from environment");
            self.auth.jwt_secret = secret;
        }
        if let Some(bind) = lookup("RLMK_BIND") {
            self.server.bind_address = bind;
        }
        if let Some(port) = lookup("RLMK_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(e) => warn!("invalid RLMK_PORT value {port:?}: {e}"),
            }
        }
        if let Some(path) = lookup("RLMK_DATABASE_PATH") {
            self.database.path = path;
        }
        if let Some(level) = lookup("RLMK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(url) = lookup("RLMK_API_URL") {
            self.client.api_url = url;
        }
    }

    /// The configured JWT secret, or an error when none is set.
    pub fn require_jwt_secret(&self) -> RlmkResult<&str> {
        let secret = self.auth.jwt_secret.trim();
        if secret.is_empty() {
            return Err(RlmkError::MissingConfig(
                "auth.jwt_secret (or RLMK_JWT_SECRET) must be set".into(),
            ));
        }
        Ok(secret)
    }

    /// The socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    /// Normalize an API base URL: add a scheme when missing and strip
    /// trailing slashes.
    pub fn sanitize_api_url(address: &str) -> String {
        let trimmed = address.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}

/// Generate a 32-byte random secret encoded as base64url (no padding).
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Thread-safe configuration holder for shared access across services.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<AppConfig>>,
}

impl ConfigHandle {
    /// Create a new configuration handle.
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Read the configuration.
    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.read().await
    }

    /// Write/update the configuration.
    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, AppConfig> {
        self.inner.write().await
    }

    /// Clone the current configuration out of the handle.
    pub async fn snapshot(&self) -> AppConfig {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.token_ttl_days, 7);
        assert!(config.database.wal_mode);
        assert_eq!(config.logging.level, "info");
        assert!(config.require_jwt_secret().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("JWT_SECRET", "fallback"),
            ("RLMK_PORT", "8081"),
            ("RLMK_DATABASE_PATH", "/tmp/x.db"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.auth.jwt_secret, "fallback");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.database.path, "/tmp/x.db");
        assert_eq!(config.require_jwt_secret().unwrap(), "fallback");
    }

    #[test]
    fn test_rlmk_secret_wins_over_plain() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(|k| match k {
            "RLMK_JWT_SECRET" => Some("primary".into()),
            "JWT_SECRET" => Some("fallback".into()),
            _ => None,
        });
        assert_eq!(config.auth.jwt_secret, "primary");
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(|k| (k == "RLMK_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_sanitize_api_url() {
        assert_eq!(
            AppConfig::sanitize_api_url("localhost:3000/"),
            "http://localhost:3000"
        );
        assert_eq!(
            AppConfig::sanitize_api_url("  \"https://rlmk.example.com/\"  "),
            "https://rlmk.example.com"
        );
        assert_eq!(AppConfig::sanitize_api_url("   "), "");
    }

    #[test]
    fn test_generate_secret() {
        let a = generate_secret();
        let b = generate_secret();
        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "s3cret".into();
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.auth.jwt_secret, "s3cret");
        assert_eq!(loaded.server.port, config.server.port);
    }

    #[test]
    fn test_load_missing_explicit_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("not-yet-written.toml");

        let config = AppConfig::load_with(Some(&path), |k| {
            (k == "RLMK_PORT").then(|| "8082".to_string())
        })
        .unwrap();

        assert_eq!(config.server.port, 8082);
        assert_eq!(config.database.path, AppConfig::default().database.path);
        assert!(!path.exists());
    }

    #[test]
    fn test_load_existing_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rlmk.toml");
        std::fs::write(&path, "[server]\nport = 9100\n").unwrap();

        let config = AppConfig::load_with(Some(&path), |_| None).unwrap();
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.auth.bcrypt_cost, 10);
    }
}
