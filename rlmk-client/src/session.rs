//! Locally stored login session.
//!
//! After a successful login the token and the user's households are written
//! as JSON to `Platform::session_path()`. Later commands reuse the token and
//! default to the first household.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use rlmk_core::config::ClientConfig;
use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_core::platform::Platform;
use rlmk_models::api::AuthResponse;
use rlmk_models::{User, UserHousehold};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Server the token was issued by.
    pub api_url: String,
    pub token: String,
    pub user: User,
    pub households: Vec<UserHousehold>,
    pub saved_at: String,
}

impl Session {
    pub fn from_auth(api_url: &str, resp: &AuthResponse) -> Self {
        Self {
            api_url: api_url.to_string(),
            token: resp.token.clone(),
            user: resp.user.clone(),
            households: resp.households.clone(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// The household commands default to.
    pub fn primary_household(&self) -> Option<&UserHousehold> {
        self.households.first()
    }

    /// Explicit household if given, else the primary one.
    pub fn household_or_primary(&self, explicit: Option<i64>) -> RlmkResult<i64> {
        explicit
            .or_else(|| self.primary_household().map(|h| h.id))
            .ok_or_else(|| RlmkError::validation("no household: pass --household or create one first"))
    }

    /// Client settings that target the server which issued this token.
    pub fn client_config(&self, configured: &ClientConfig) -> ClientConfig {
        let mut config = configured.clone();
        if !self.api_url.is_empty() && self.api_url != configured.api_url {
            warn!(
                "session was issued by {}, not the configured {}; using the session's server",
                self.api_url, configured.api_url
            );
            config.api_url = self.api_url.clone();
        }
        config
    }

    pub fn save_to(&self, path: &Path) -> RlmkResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!("session saved to {}", path.display());
        Ok(())
    }

    /// Load a session, `None` if the file does not exist.
    pub fn load_from(path: &Path) -> RlmkResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Remove the session file. Returns whether one existed.
    pub fn clear_at(path: &Path) -> RlmkResult<bool> {
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }

    pub fn save(&self) -> RlmkResult<()> {
        self.save_to(&Platform::session_path()?)
    }

    pub fn load() -> RlmkResult<Option<Self>> {
        Self::load_from(&Platform::session_path()?)
    }

    /// Load the session or fail with `NotLoggedIn`.
    pub fn require() -> RlmkResult<Self> {
        Self::load()?.ok_or(RlmkError::NotLoggedIn)
    }

    pub fn clear() -> RlmkResult<bool> {
        Self::clear_at(&Platform::session_path()?)
    }
}
