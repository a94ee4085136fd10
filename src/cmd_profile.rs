//! Profile, history and settings subcommand handlers.

use tracing::warn;

use jobfill_config::Config;
use jobfill_protocols::Outcome;
use jobfill_runtime::{BackendClient, LocalStore, SessionContext};

use crate::cli::{ProfileAction, Toggle};

/// Handle profile subcommands.
pub(crate) async fn handle_profile_command(
    config: &Config,
    action: ProfileAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProfileAction::Fetch => profile_fetch(config).await,
        ProfileAction::Show => profile_show(config).await,
        ProfileAction::Logout => profile_logout(config).await,
    }
}

async fn profile_fetch(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = BackendClient::new(&config.backend)?;
    match client.status().await {
        Ok(status) if status.logged_in => {
            println!("Logged in as {}", status.username.as_deref().unwrap_or("unknown"));
        }
        Ok(_) => println!("Not logged in to {}", client.base_url()),
        Err(e) => warn!(error = %e, "Could not read login status"),
    }

    let profile = client.user_data().await?;
    let mut store = LocalStore::open(&config.storage).await?;
    store.remember_profile(profile.clone()).await?;
    println!("Profile {}% complete", profile.completion_percentage());
    Ok(())
}

async fn profile_show(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalStore::open(&config.storage).await?;
    match store.profile() {
        Some(profile) => println!("{}", serde_json::to_string_pretty(profile)?),
        None => println!("No cached profile. Run `jobfill profile fetch` first."),
    }
    Ok(())
}

async fn profile_logout(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = BackendClient::new(&config.backend)?;
    let store = LocalStore::open(&config.storage).await?;
    let mut session = SessionContext::new(config, Box::new(client), store);
    session.logout().await?;
    println!("Logged out.");
    Ok(())
}

/// Print the newest entries of the success or error log.
pub(crate) async fn history(
    config: &Config,
    errors: bool,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalStore::open(&config.storage).await?;
    let entries = if errors { store.errors() } else { store.history() };
    if entries.is_empty() {
        println!("No entries.");
        return Ok(());
    }

    println!("{:<22} {:<12} {}", "TIME", "RESULT", "URL");
    println!("{}", "-".repeat(80));
    for entry in entries.iter().rev().take(limit) {
        let result = match &entry.outcome {
            Outcome::Success { fields_filled } => format!("{} filled", fields_filled),
            Outcome::Error { error } => error.clone(),
        };
        println!(
            "{:<22} {:<12} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            result,
            entry.url
        );
    }
    Ok(())
}

/// Show or set the ATS mode toggle.
pub(crate) async fn ats_mode(
    config: &Config,
    state: Option<Toggle>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = LocalStore::open(&config.storage).await?;
    if let Some(state) = state {
        store.set_ats_mode(matches!(state, Toggle::On)).await?;
    }
    println!("ATS mode: {}", if store.ats_mode() { "on" } else { "off" });
    Ok(())
}
