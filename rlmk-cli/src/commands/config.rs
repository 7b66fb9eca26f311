//! Configuration file commands.

use std::path::PathBuf;

use clap::Subcommand;
use console::style;

use rlmk_core::config::{generate_secret, AppConfig, ConfigHandle};
use rlmk_core::error::{RlmkError, RlmkResult};

use super::{print_json, print_ok};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a config file with a freshly generated JWT secret.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Show the effective configuration (secret masked).
    Show,
    /// Show the config file path.
    Path,
}

fn config_path(explicit: Option<&str>) -> RlmkResult<PathBuf> {
    match explicit {
        Some(p) => Ok(PathBuf::from(p)),
        None => AppConfig::default_config_path(),
    }
}

/// Replace a non-empty secret with asterisks.
fn masked(mut config: AppConfig) -> AppConfig {
    if !config.auth.jwt_secret.is_empty() {
        config.auth.jwt_secret = "********".into();
    }
    config
}

/// Defaults plus a new secret. Environment overrides stay out of the file.
fn fresh_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = generate_secret();
    config
}

pub async fn run(
    config: ConfigHandle,
    action: ConfigAction,
    explicit_path: Option<&str>,
    format: OutputFormat,
) -> RlmkResult<()> {
    let path = config_path(explicit_path)?;

    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                return Err(RlmkError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            fresh_config().save_to_file(&path)?;

            match format {
                OutputFormat::Json => print_json(&serde_json::json!({"path": path.display().to_string()}))?,
                OutputFormat::Text => {
                    print_ok(&format!("Wrote {}", path.display()));
                    println!("  A new JWT secret was generated; tokens issued before are now invalid.");
                }
            }
        }
        ConfigAction::Show => {
            let cfg = masked(config.snapshot().await);
            match format {
                OutputFormat::Json => print_json(&cfg)?,
                OutputFormat::Text => {
                    let text = toml::to_string_pretty(&cfg)
                        .map_err(|e| RlmkError::Config(format!("failed to serialize config: {e}")))?;
                    println!("{}", style(format!("# {}", path.display())).dim());
                    println!("{text}");
                }
            }
        }
        ConfigAction::Path => match format {
            OutputFormat::Json => print_json(&serde_json::json!({"path": path.display().to_string()}))?,
            OutputFormat::Text => println!("{}", path.display()),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_secret() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "very-secret".into();
        assert_eq!(masked(config).auth.jwt_secret, "********");
        assert_eq!(masked(AppConfig::default()).auth.jwt_secret, "");
    }

    #[test]
    fn test_explicit_path_wins() {
        assert_eq!(config_path(Some("/tmp/rlmk.toml")).unwrap(), PathBuf::from("/tmp/rlmk.toml"));
    }

    #[test]
    fn test_fresh_config_ignores_effective_values() {
        let written = fresh_config();
        let defaults = AppConfig::default();
        assert_eq!(written.server.port, defaults.server.port);
        assert_eq!(written.database.path, defaults.database.path);
        assert_eq!(written.client.api_url, defaults.client.api_url);
        assert!(!written.auth.jwt_secret.is_empty());
        assert_ne!(written.auth.jwt_secret, fresh_config().auth.jwt_secret);
    }
}
