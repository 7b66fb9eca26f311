//! Plants tab - plants and their sensor history.

use clap::Subcommand;
use console::style;

use rlmk_core::config::ConfigHandle;
use rlmk_core::error::RlmkResult;
use rlmk_models::api::{CreatePlantRequest, HistoryPoint};

use super::{new_table, or_dash, print_json, print_ok};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum PlantsAction {
    /// List plants of the household.
    List {
        #[arg(long)]
        household: Option<i64>,
    },
    /// Add a plant.
    Add {
        name: String,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        room: Option<i64>,
        /// ESP32 device monitoring the plant.
        #[arg(long)]
        device: Option<i64>,
        /// Soil moisture percentage below which the plant needs water.
        #[arg(long)]
        threshold: Option<f64>,
        #[arg(long)]
        household: Option<i64>,
    },
    /// Delete a plant.
    Delete { id: i64 },
    /// Show the sensor history of a plant.
    History {
        id: i64,
        /// Number of readings to fetch.
        #[arg(short = 'n', long)]
        limit: Option<i64>,
    },
}

fn series_summary(points: &[HistoryPoint]) -> String {
    match points.first() {
        Some(latest) => format!("{:.1} ({} points, latest {})", latest.value, points.len(), latest.timestamp),
        None => "-".to_string(),
    }
}

pub async fn run(config: ConfigHandle, action: PlantsAction, format: OutputFormat) -> RlmkResult<()> {
    let (api, session) = super::session_client(&config).await?;

    match action {
        PlantsAction::List { household } => {
            let household_id = session.household_or_primary(household)?;
            let plants = api.list_plants(Some(household_id)).await?;
            match format {
                OutputFormat::Json => print_json(&plants)?,
                OutputFormat::Text => {
                    let mut table = new_table(vec!["ID", "Name", "Species", "Room", "Device", "Threshold"]);
                    for p in &plants {
                        table.add_row(vec![
                            or_dash(p.id),
                            p.name.clone(),
                            or_dash(p.species.as_deref()),
                            or_dash(p.room_id),
                            or_dash(p.device_id),
                            or_dash(p.moisture_threshold),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        PlantsAction::Add {
            name,
            species,
            room,
            device,
            threshold,
            household,
        } => {
            let household_id = session.household_or_primary(household)?;
            let plant = api
                .create_plant(&CreatePlantRequest {
                    name: Some(name),
                    species,
                    household_id: Some(household_id),
                    room_id: room,
                    device_id: device,
                    moisture_threshold: threshold,
                })
                .await?;
            match format {
                OutputFormat::Json => print_json(&plant)?,
                OutputFormat::Text => print_ok(&format!("Plant {} created (#{}).", plant.name, or_dash(plant.id))),
            }
        }
        PlantsAction::Delete { id } => {
            let resp = api.delete_plant(id).await?;
            match format {
                OutputFormat::Json => print_json(&resp)?,
                OutputFormat::Text => print_ok(&format!("Plant #{id} deleted.")),
            }
        }
        PlantsAction::History { id, limit } => {
            let history = api.plant_history(id, limit).await?;
            match format {
                OutputFormat::Json => print_json(&history)?,
                OutputFormat::Text => {
                    println!("{}", style(format!("Plant #{id}")).bold().underlined());
                    if history.device_id.is_none() {
                        println!("  No sensor linked.");
                        return Ok(());
                    }
                    println!("  Soil moisture: {} %", series_summary(&history.soil_moisture));
                    println!("  Temperature:   {}", series_summary(&history.temperature));
                    println!("  Light:         {}", series_summary(&history.light));
                }
            }
        }
    }
    Ok(())
}
