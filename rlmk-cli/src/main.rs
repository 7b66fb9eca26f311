//! RLMK CLI - server launcher and terminal dashboard.
//!
//! `rlmk serve` runs the REST API. Every other command either manages the
//! local database and configuration or talks to a running server as a
//! logged-in user, one subcommand per dashboard tab.

mod commands;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use rlmk_core::config::{AppConfig, ConfigHandle};
use rlmk_core::constants::{APP_NAME, APP_VERSION};
use rlmk_core::error::RlmkResult;
use rlmk_core::logging;
use rlmk_core::Platform;

/// RLMK - household management: inventory, plants and sensors.
#[derive(Parser)]
#[command(
    name = "rlmk",
    version,
    about = "RLMK household management CLI",
    long_about = "Run the RLMK API server or manage your household from the terminal:\n\
                  rooms, stocks, food items, plants and ESP32 sensors."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Server URL (overrides config).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve {
        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind (overrides config).
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Database management commands.
    Db {
        #[command(subcommand)]
        action: commands::db::DbAction,
    },
    /// Configuration file commands.
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Create an account and log in.
    Register {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Also create a household with this name.
        #[arg(long)]
        household: Option<String>,
    },
    /// Log in and store the session locally.
    Login {
        email: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Show the logged-in user and their households.
    Me,
    /// Household overview (dashboard counts).
    Overview {
        #[arg(long)]
        household: Option<i64>,
    },
    /// Household members.
    Users {
        #[command(subcommand)]
        action: commands::users::UsersAction,
    },
    /// Rooms of a household.
    Rooms {
        #[command(subcommand)]
        action: commands::rooms::RoomsAction,
    },
    /// Stocks and food items.
    Inventory {
        #[command(subcommand)]
        action: commands::inventory::InventoryAction,
    },
    /// Plants and their sensor history.
    Plants {
        #[command(subcommand)]
        action: commands::plants::PlantsAction,
    },
    /// ESP32 sensor devices.
    Devices {
        #[command(subcommand)]
        action: commands::devices::DevicesAction,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration. A missing file means defaults, so `config init`
    // can write to a `--config` path that does not exist yet.
    let mut config = AppConfig::load(cli.config.as_deref().map(Path::new))
        .context("failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.client.api_url = AppConfig::sanitize_api_url(&url);
    }

    // Initialize logging. The server logs at its configured level; client
    // commands stay quiet unless --verbose.
    let log_level = match (&cli.command, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Commands::Serve { .. }, false) => config.logging.level.clone(),
        _ => "warn".to_string(),
    };
    let _guard = logging::init_logging(&log_level, &config.effective_log_dir()?, config.logging.json_output)?;
    debug!("{} CLI v{} on {}", APP_NAME, APP_VERSION, Platform::current());

    let config = ConfigHandle::new(config);

    // Dispatch to command handlers
    let result: RlmkResult<()> = match cli.command {
        Commands::Serve { port, bind } => commands::serve::run(config, port, bind).await,
        Commands::Db { action } => commands::db::run(config, action, cli.format).await,
        Commands::Config { action } => {
            commands::config::run(config, action, cli.config.as_deref(), cli.format).await
        }
        Commands::Register {
            email,
            first_name,
            last_name,
            household,
        } => {
            commands::auth::register(config, email, first_name, last_name, household, cli.format).await
        }
        Commands::Login { email } => commands::auth::login(config, email, cli.format).await,
        Commands::Logout => commands::auth::logout(cli.format),
        Commands::Me => commands::auth::me(config, cli.format).await,
        Commands::Overview { household } => {
            commands::overview::run(config, household, cli.format).await
        }
        Commands::Users { action } => commands::users::run(config, action, cli.format).await,
        Commands::Rooms { action } => commands::rooms::run(config, action, cli.format).await,
        Commands::Inventory { action } => {
            commands::inventory::run(config, action, cli.format).await
        }
        Commands::Plants { action } => commands::plants::run(config, action, cli.format).await,
        Commands::Devices { action } => commands::devices::run(config, action, cli.format).await,
    };
    Ok(result?)
}
