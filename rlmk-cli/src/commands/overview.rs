//! Overview tab - the household's dashboard counts.

use console::style;

use rlmk_core::config::ConfigHandle;
use rlmk_core::error::RlmkResult;

use super::{new_table, print_json, spinner};
use crate::OutputFormat;

pub async fn run(config: ConfigHandle, household: Option<i64>, format: OutputFormat) -> RlmkResult<()> {
    let (api, session) = super::session_client(&config).await?;
    let household_id = session.household_or_primary(household)?;

    let pb = spinner("Loading overview...");
    let result = api.dashboard(household_id).await;
    pb.finish_and_clear();
    let counts = result?;

    match format {
        OutputFormat::Json => print_json(&counts)?,
        OutputFormat::Text => {
            let name = session
                .households
                .iter()
                .find(|h| h.id == household_id)
                .map(|h| h.name.clone())
                .unwrap_or_else(|| format!("#{household_id}"));
            println!("{}", style(format!("Overview: {name}")).bold().underlined());

            let mut table = new_table(vec!["", "Count"]);
            table.add_row(vec!["Members".to_string(), counts.members.to_string()]);
            table.add_row(vec!["Rooms".to_string(), counts.rooms.to_string()]);
            table.add_row(vec!["Stocks".to_string(), counts.stocks.to_string()]);
            table.add_row(vec!["Food items".to_string(), counts.food_items.to_string()]);
            table.add_row(vec!["Plants".to_string(), counts.plants.to_string()]);
            table.add_row(vec!["Devices".to_string(), counts.devices.to_string()]);
            println!("{table}");

            if counts.low_stock_items > 0 {
                println!(
                    "  {} {} item(s) running low",
                    style("!").yellow().bold(),
                    counts.low_stock_items
                );
            }
            if counts.expiring_soon > 0 {
                println!(
                    "  {} {} item(s) expired or expiring within 3 days",
                    style("!").red().bold(),
                    counts.expiring_soon
                );
            }
        }
    }
    Ok(())
}
