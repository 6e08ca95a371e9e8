//! GroupWarden bot
//!
//! Main application entry point

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use groupwarden::{
    bot::BotRuntime,
    config::{BotConfigStore, Settings},
    dashboard::{self, DashboardState},
    services::{CommandBatterySource, ConfigSource, HttpDashboard, ServiceFactory, StatusPublisher},
    transport::{ChatTransport, GatewayTransport},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load settings")?;
    settings.validate().context("invalid settings")?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", groupwarden::info());

    let bot_config = BotConfigStore::load(&settings.bot.config_file).await?;
    let transport: Arc<dyn ChatTransport> = Arc::new(GatewayTransport::new(&settings.gateway)?);

    // The dashboard link is chosen once: in-process state or its HTTP API
    let (publisher, config_source): (Arc<dyn StatusPublisher>, Arc<dyn ConfigSource>) = if settings.dashboard.enabled {
        let state = DashboardState::new(&settings.dashboard, settings.battery.history_size);
        let dashboard_config = settings.dashboard.clone();
        let server_state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = dashboard::serve(server_state, &dashboard_config).await {
                error!(error = %e, "Dashboard server stopped");
            }
        });
        info!("Dashboard running in-process");
        (Arc::new(state.clone()), Arc::new(state))
    } else {
        let remote = HttpDashboard::new(&settings.dashboard)?;
        info!(url = %settings.dashboard.remote_url, "Using remote dashboard");
        (Arc::new(remote.clone()), Arc::new(remote))
    };

    let services = ServiceFactory::new(settings.clone(), transport, bot_config, publisher, config_source);

    if services.dashboard_config.reload().await.is_err() {
        warn!("Starting without dashboard configuration; defaults apply until the next reload");
    }
    services.start_config_reload();

    if settings.battery.enabled {
        let source = CommandBatterySource::new(&settings.battery)?;
        services.start_battery_monitor(Arc::new(source));
    }

    let runtime = BotRuntime::new(services.clone());

    let result = tokio::select! {
        result = runtime.run() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            Ok(())
        }
    };

    services.scheduler.shutdown();

    match result {
        Ok(()) => {
            info!("GroupWarden has been shut down.");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Bot stopped");
            Err(e.into())
        }
    }
}
