//! Rooms tab.

use clap::Subcommand;

use rlmk_core::config::ConfigHandle;
use rlmk_core::error::RlmkResult;
use rlmk_models::api::{CreateRoomRequest, RoomPatch};

use super::{new_table, or_dash, print_json, print_ok};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum RoomsAction {
    /// List rooms of the household.
    List {
        #[arg(long)]
        household: Option<i64>,
    },
    /// Add a room.
    Add {
        name: String,
        /// Room type, e.g. cuisine, salon.
        #[arg(long = "type")]
        room_type: Option<String>,
        #[arg(long)]
        household: Option<i64>,
    },
    /// Rename a room or change its type.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        room_type: Option<String>,
    },
    /// Delete a room with its stocks and food items.
    Delete { id: i64 },
}

pub async fn run(config: ConfigHandle, action: RoomsAction, format: OutputFormat) -> RlmkResult<()> {
    let (api, session) = super::session_client(&config).await?;

    match action {
        RoomsAction::List { household } => {
            let household_id = session.household_or_primary(household)?;
            let rooms = api.list_rooms(Some(household_id)).await?;
            match format {
                OutputFormat::Json => print_json(&rooms)?,
                OutputFormat::Text => {
                    let mut table = new_table(vec!["ID", "Name", "Type"]);
                    for r in &rooms {
                        table.add_row(vec![or_dash(r.id), r.name.clone(), or_dash(r.room_type.as_deref())]);
                    }
                    println!("{table}");
                }
            }
        }
        RoomsAction::Add { name, room_type, household } => {
            let household_id = session.household_or_primary(household)?;
            let room = api
                .create_room(&CreateRoomRequest {
                    name: Some(name),
                    room_type,
                    household_id: Some(household_id),
                })
                .await?;
            match format {
                OutputFormat::Json => print_json(&room)?,
                OutputFormat::Text => print_ok(&format!("Room {} created (#{}).", room.name, or_dash(room.id))),
            }
        }
        RoomsAction::Update { id, name, room_type } => {
            let room = api.update_room(id, &RoomPatch { name, room_type }).await?;
            match format {
                OutputFormat::Json => print_json(&room)?,
                OutputFormat::Text => print_ok(&format!("Room #{id} updated.")),
            }
        }
        RoomsAction::Delete { id } => {
            let resp = api.delete_room(id).await?;
            match format {
                OutputFormat::Json => print_json(&resp)?,
                OutputFormat::Text => print_ok(&format!("Room #{id} deleted.")),
            }
        }
    }
    Ok(())
}
