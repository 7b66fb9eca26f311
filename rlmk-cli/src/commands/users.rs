//! Users tab - household members and their roles.

use clap::Subcommand;

use rlmk_core::config::ConfigHandle;
use rlmk_core::error::RlmkResult;

use super::{new_table, print_json, print_ok};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum UsersAction {
    /// List members of the household.
    List {
        #[arg(long)]
        household: Option<i64>,
    },
    /// Add a registered user by email.
    Add {
        email: String,
        /// admin or member.
        #[arg(long, default_value = "member")]
        role: String,
        #[arg(long)]
        household: Option<i64>,
    },
    /// Change a member's role.
    Role {
        user_id: i64,
        /// admin or member.
        role: String,
        #[arg(long)]
        household: Option<i64>,
    },
    /// Remove a member from the household.
    Remove {
        user_id: i64,
        #[arg(long)]
        household: Option<i64>,
    },
}

pub async fn run(config: ConfigHandle, action: UsersAction, format: OutputFormat) -> RlmkResult<()> {
    let (api, session) = super::session_client(&config).await?;

    match action {
        UsersAction::List { household } => {
            let household_id = session.household_or_primary(household)?;
            let members = api.list_members(household_id).await?;
            match format {
                OutputFormat::Json => print_json(&members)?,
                OutputFormat::Text => {
                    let mut table = new_table(vec!["User", "Name", "Email", "Role", "Joined"]);
                    for m in &members {
                        table.add_row(vec![
                            m.user_id.to_string(),
                            format!("{} {}", m.first_name, m.last_name),
                            m.email.clone(),
                            m.role.clone(),
                            m.joined_at.clone(),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        UsersAction::Add { email, role, household } => {
            let household_id = session.household_or_primary(household)?;
            let member = api.add_member(household_id, &email, &role).await?;
            match format {
                OutputFormat::Json => print_json(&member)?,
                OutputFormat::Text => print_ok(&format!("Added {} as {}.", member.email, member.role)),
            }
        }
        UsersAction::Role { user_id, role, household } => {
            let household_id = session.household_or_primary(household)?;
            let membership = api.update_member_role(household_id, user_id, &role).await?;
            match format {
                OutputFormat::Json => print_json(&membership)?,
                OutputFormat::Text => {
                    print_ok(&format!("User {user_id} is now {}.", membership.role))
                }
            }
        }
        UsersAction::Remove { user_id, household } => {
            let household_id = session.household_or_primary(household)?;
            let resp = api.remove_member(household_id, user_id).await?;
            match format {
                OutputFormat::Json => print_json(&resp)?,
                OutputFormat::Text => print_ok(&format!("Removed user {user_id}.")),
            }
        }
    }
    Ok(())
}
