//! Devices tab - ESP32 sensors.

use clap::Subcommand;

use rlmk_core::config::ConfigHandle;
use rlmk_core::error::RlmkResult;
use rlmk_models::api::RegisterDeviceRequest;

use super::{new_table, or_dash, print_json, print_ok};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum DevicesAction {
    /// List devices of the household.
    List {
        #[arg(long)]
        household: Option<i64>,
    },
    /// Register a device by MAC address.
    Register {
        name: String,
        /// MAC address, e.g. 24:6F:28:AA:BB:CC.
        mac: String,
        #[arg(long)]
        household: Option<i64>,
    },
}

pub async fn run(config: ConfigHandle, action: DevicesAction, format: OutputFormat) -> RlmkResult<()> {
    let (api, session) = super::session_client(&config).await?;

    match action {
        DevicesAction::List { household } => {
            let household_id = session.household_or_primary(household)?;
            let devices = api.list_devices(Some(household_id)).await?;
            match format {
                OutputFormat::Json => print_json(&devices)?,
                OutputFormat::Text => {
                    let mut table = new_table(vec!["ID", "Name", "MAC", "Last seen"]);
                    for d in &devices {
                        table.add_row(vec![
                            or_dash(d.id),
                            d.name.clone(),
                            d.mac_address.clone(),
                            or_dash(d.last_seen.as_deref()),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        DevicesAction::Register { name, mac, household } => {
            let household_id = session.household_or_primary(household)?;
            let device = api
                .register_device(&RegisterDeviceRequest {
                    name: Some(name),
                    mac_address: Some(mac),
                    household_id: Some(household_id),
                })
                .await?;
            match format {
                OutputFormat::Json => print_json(&device)?,
                OutputFormat::Text => {
                    print_ok(&format!("Device {} registered as #{}.", device.mac_address, or_dash(device.id)))
                }
            }
        }
    }
    Ok(())
}
