//! Standalone dashboard server
//!
//! Runs the web dashboard in its own process; the bot reaches it over HTTP.

use anyhow::Context;
use tracing::info;

use groupwarden::{
    config::Settings,
    dashboard::{self, DashboardState},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::new().context("failed to load settings")?;
    settings.validate().context("invalid settings")?;

    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {} dashboard...", groupwarden::info());

    let state = DashboardState::new(&settings.dashboard, settings.battery.history_size);
    // Create the web config file up front so it can be edited by hand
    state.web_config.load().await?;

    tokio::select! {
        result = dashboard::serve(state, &settings.dashboard) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    info!("Dashboard has been shut down.");
    Ok(())
}
