//! Platform-specific directories.

use std::path::PathBuf;
use crate::error::{RlmkError, RlmkResult};

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Detect the current platform at compile time.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Get the platform-specific application data directory.
    ///
    /// - Windows: `%APPDATA%/rlmk`
    /// - macOS: `~/Library/Application Support/rlmk`
    /// - Linux: `~/.local/share/rlmk`
    pub fn data_dir() -> RlmkResult<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| RlmkError::Config("could not determine data directory".into()))?;
        Ok(base.join("rlmk"))
    }

    /// Get the platform-specific configuration directory.
    ///
    /// - Windows: `%APPDATA%/rlmk`
    /// - macOS: `~/Library/Application Support/rlmk`
    /// - Linux: `~/.config/rlmk`
    pub fn config_dir() -> RlmkResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| RlmkError::Config("could not determine config directory".into()))?;
        Ok(base.join("rlmk"))
    }

    /// Path of the stored client session.
    pub fn session_path() -> RlmkResult<PathBuf> {
        Ok(Self::data_dir()?.join("session.json"))
    }

    /// Get a human-readable platform name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_name() {
        assert_eq!(Platform::Windows.name(), "Windows");
        assert_eq!(Platform::MacOs.name(), "macOS");
        assert_eq!(Platform::Linux.name(), "Linux");
    }

    #[test]
    fn test_session_path_under_data_dir() {
        if let (Ok(data), Ok(session)) = (Platform::data_dir(), Platform::session_path()) {
            assert!(session.starts_with(data));
        }
    }
}
