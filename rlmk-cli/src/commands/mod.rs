//! CLI command implementations.

pub mod serve;
pub mod db;
pub mod config;
pub mod auth;
pub mod overview;
pub mod users;
pub mod rooms;
pub mod inventory;
pub mod plants;
pub mod devices;

use std::path::PathBuf;
use std::time::Duration;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use rlmk_client::{ApiClient, Session};
use rlmk_core::config::ConfigHandle;
use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::Database;

/// Open (and migrate) the database named by the config.
pub async fn init_database(config: &ConfigHandle) -> RlmkResult<(Database, PathBuf)> {
    let cfg = config.read().await;
    let db_path = cfg.effective_db_path()?;
    let db = Database::init(&db_path, &cfg.database)?;
    Ok((db, db_path))
}

/// API client without a token.
pub async fn create_api_client(config: &ConfigHandle) -> RlmkResult<ApiClient> {
    let client_config = config.read().await.client.clone();
    ApiClient::new(&client_config)
}

/// API client carrying the stored session's token, pointed at the server
/// that issued it. Fails with `NotLoggedIn` when no session file exists; the
/// token itself is not checked here.
pub async fn session_client(config: &ConfigHandle) -> RlmkResult<(ApiClient, Session)> {
    let session = Session::require()?;
    let client_config = session.client_config(&config.read().await.client);
    let client = ApiClient::new(&client_config)?;
    client.set_token(Some(session.token.clone())).await;
    Ok((client, session))
}

/// A table with the shared look.
pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Spinner shown while waiting on the server.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_json<T: Serialize>(value: &T) -> RlmkResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_ok(message: &str) {
    println!("  {} {message}", style("OK").green().bold());
}

/// Show an optional value, or a dash.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Format a quantity without a trailing ".0" for whole numbers.
pub fn format_quantity(quantity: f64, unit: Option<&str>) -> String {
    let number = if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        format!("{quantity}")
    };
    match unit {
        Some(u) if !u.is_empty() => format!("{number} {u}"),
        _ => number,
    }
}

/// Take `value` or ask for it interactively.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> RlmkResult<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| RlmkError::Internal(e.to_string())),
    }
}

pub fn prompt_password(prompt: &str) -> RlmkResult<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| RlmkError::Internal(e.to_string()))
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
