//! Account and session commands.

use console::style;

use rlmk_client::Session;
use rlmk_core::config::ConfigHandle;
use rlmk_core::error::RlmkResult;
use rlmk_models::api::{AuthResponse, RegisterRequest};
use rlmk_models::UserHousehold;

use super::{new_table, print_json, print_ok, prompt_password, spinner, value_or_prompt};
use crate::OutputFormat;

fn print_households(households: &[UserHousehold]) {
    if households.is_empty() {
        println!("  No household yet.");
        return;
    }
    let mut table = new_table(vec!["ID", "Household", "Role"]);
    for h in households {
        table.add_row(vec![h.id.to_string(), h.name.clone(), h.role.clone()]);
    }
    println!("{table}");
}

async fn store_session(config: &ConfigHandle, resp: &AuthResponse, format: OutputFormat) -> RlmkResult<()> {
    let api_url = config.read().await.client.api_url.clone();
    let session = Session::from_auth(&api_url, resp);
    session.save()?;

    match format {
        OutputFormat::Json => print_json(&session)?,
        OutputFormat::Text => {
            print_ok(&format!(
                "Logged in as {} {} <{}>",
                resp.user.first_name, resp.user.last_name, resp.user.email
            ));
            print_households(&resp.households);
        }
    }
    Ok(())
}

pub async fn register(
    config: ConfigHandle,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    household: Option<String>,
    format: OutputFormat,
) -> RlmkResult<()> {
    let req = RegisterRequest {
        email: Some(value_or_prompt(email, "Email")?),
        first_name: Some(value_or_prompt(first_name, "First name")?),
        last_name: Some(value_or_prompt(last_name, "Last name")?),
        password: Some(prompt_password("Password")?),
        household_name: household,
    };

    let api = super::create_api_client(&config).await?;
    let pb = spinner("Creating account...");
    let result = api.register(&req).await;
    pb.finish_and_clear();

    store_session(&config, &result?, format).await
}

pub async fn login(config: ConfigHandle, email: Option<String>, format: OutputFormat) -> RlmkResult<()> {
    let email = value_or_prompt(email, "Email")?;
    let password = prompt_password("Password")?;

    let api = super::create_api_client(&config).await?;
    let pb = spinner("Logging in...");
    let result = api.login(&email, &password).await;
    pb.finish_and_clear();

    store_session(&config, &result?, format).await
}

pub fn logout(format: OutputFormat) -> RlmkResult<()> {
    let removed = Session::clear()?;
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({"loggedOut": removed}))?,
        OutputFormat::Text if removed => print_ok("Logged out."),
        OutputFormat::Text => println!("  Not logged in."),
    }
    Ok(())
}

pub async fn me(config: ConfigHandle, format: OutputFormat) -> RlmkResult<()> {
    let (api, _session) = super::session_client(&config).await?;
    let me = api.me().await?;

    match format {
        OutputFormat::Json => print_json(&me)?,
        OutputFormat::Text => {
            println!("{}", style("Account").bold().underlined());
            println!("  Name:     {} {}", me.user.first_name, me.user.last_name);
            println!("  Email:    {}", me.user.email);
            println!("  Since:    {}", me.user.created_at);
            if let Some(role) = &me.role {
                println!("  Role:     {role}");
            }
            println!();
            print_households(&me.households);
        }
    }
    Ok(())
}
