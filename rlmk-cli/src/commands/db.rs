//! Database management commands.

use chrono::Utc;
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;

use rlmk_core::config::ConfigHandle;
use rlmk_core::error::RlmkResult;
use rlmk_services::seed_sample_household;

use super::{format_bytes, new_table, print_json, print_ok};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum DbAction {
    /// Show row counts and file sizes.
    Stats,
    /// Run an integrity check.
    Check,
    /// Reset the database (WARNING: destroys all data).
    Reset {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the database file path.
    Path,
    /// Insert a sample household with rooms, stocks, food items, plants and a sensor.
    Seed {
        /// Make this registered user the admin of the sample household.
        #[arg(long)]
        owner: Option<String>,
    },
}

pub async fn run(config: ConfigHandle, action: DbAction, format: OutputFormat) -> RlmkResult<()> {
    match action {
        DbAction::Stats => {
            let (db, db_path) = super::init_database(&config).await?;
            let stats = db.stats()?;

            let file_size = std::fs::metadata(&db_path).ok().map(|m| m.len());
            let wal_size = std::fs::metadata(db_path.with_extension("db-wal"))
                .ok()
                .map(|m| m.len());

            let conn = db.conn()?;
            let journal_mode: String = conn
                .query_row("PRAGMA journal_mode", [], |row| row.get(0))
                .unwrap_or_else(|_| "unknown".to_string());

            match format {
                OutputFormat::Json => {
                    let tables: serde_json::Map<String, serde_json::Value> = stats
                        .rows()
                        .into_iter()
                        .map(|(name, count)| (name.to_string(), count.into()))
                        .collect();
                    print_json(&serde_json::json!({
                        "path": db_path.display().to_string(),
                        "tables": tables,
                        "file_size_bytes": file_size,
                        "wal_size_bytes": wal_size,
                        "journal_mode": journal_mode,
                        "schema_version": stats.schema_version,
                    }))?;
                }
                OutputFormat::Text => {
                    println!("{}", style("Database Statistics").bold().underlined());
                    println!("  Path:          {}", db_path.display());
                    println!("  Journal mode:  {}", journal_mode);
                    println!("  Schema:        v{}", stats.schema_version);
                    if let Some(size) = file_size {
                        println!("  Size:          {}", format_bytes(size));
                    }
                    if let Some(size) = wal_size {
                        println!("  WAL file:      {}", format_bytes(size));
                    }
                    println!();

                    let mut table = new_table(vec!["Table", "Row Count"]);
                    for (name, count) in stats.rows() {
                        table.add_row(vec![name.to_string(), count.to_string()]);
                    }
                    println!("{table}");
                }
            }
        }
        DbAction::Check => {
            let (db, _) = super::init_database(&config).await?;

            match db.run_integrity_check() {
                Ok(()) => print_ok("Integrity check passed."),
                Err(e) => println!("  {} Integrity check failed: {e}", style("FAIL").red().bold()),
            }

            let conn = db.conn()?;
            let mut stmt = conn
                .prepare("PRAGMA foreign_key_check")
                .map_err(|e| rlmk_core::RlmkError::Database(e.to_string()))?;
            let violations: Vec<String> = stmt
                .query_map([], |row| {
                    let table: String = row.get(0)?;
                    let rowid: i64 = row.get(1)?;
                    let parent: String = row.get(2)?;
                    Ok(format!("{table} row {rowid} -> {parent}"))
                })
                .map_err(|e| rlmk_core::RlmkError::Database(e.to_string()))?
                .filter_map(|r| r.ok())
                .collect();

            if violations.is_empty() {
                print_ok("Foreign key constraints OK.");
            } else {
                println!(
                    "  {} {} foreign key violation(s):",
                    style("WARN").yellow().bold(),
                    violations.len()
                );
                for v in violations.iter().take(10) {
                    println!("    - {v}");
                }
                if violations.len() > 10 {
                    println!("    ... and {} more", violations.len() - 10);
                }
            }
        }
        DbAction::Reset { yes } => {
            let db_path = config.read().await.effective_db_path()?;
            println!("  {} This will delete ALL data.", style("WARNING").red().bold());
            println!("  Database: {}", db_path.display());

            let confirmed = yes
                || Confirm::new()
                    .with_prompt("  Are you sure you want to reset the database?")
                    .default(false)
                    .interact()
                    .unwrap_or(false);

            if !confirmed {
                println!("  Reset cancelled.");
                return Ok(());
            }

            let (db, _) = super::init_database(&config).await?;
            db.reset()?;
            print_ok("Database reset complete.");
        }
        DbAction::Path => {
            let db_path = config.read().await.effective_db_path()?;
            match format {
                OutputFormat::Json => {
                    print_json(&serde_json::json!({"path": db_path.display().to_string()}))?
                }
                OutputFormat::Text => println!("{}", db_path.display()),
            }
        }
        DbAction::Seed { owner } => {
            let (db, _) = super::init_database(&config).await?;
            let summary = seed_sample_household(&db, owner.as_deref(), Utc::now().date_naive())?;
            match format {
                OutputFormat::Json => print_json(&summary)?,
                OutputFormat::Text => {
                    print_ok(&format!("Sample household #{} created.", summary.household_id));
                    println!(
                        "  {} rooms, {} stocks, {} food items, {} plants, {} device, {} readings",
                        summary.rooms,
                        summary.stocks,
                        summary.food_items,
                        summary.plants,
                        summary.devices,
                        summary.readings
                    );
                    if owner.is_none() {
                        println!(
                            "  {} pass --owner <email> to make a user its admin.",
                            style("hint:").dim()
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
