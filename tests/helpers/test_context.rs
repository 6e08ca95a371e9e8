//! Test context for unified test setup
//!
//! Builds the full bot service graph over a mock transport, with the
//! dashboard running in-process on a temporary web config file.

use std::sync::Arc;

use tempfile::TempDir;

use groupwarden::config::{BotConfigStore, Settings};
use groupwarden::dashboard::DashboardState;
use groupwarden::models::BotConfig;
use groupwarden::services::ServiceFactory;

use super::mock_transport::MockTransport;
use super::test_data::{test_bot_config, BOT_ID};

/// Unified test context that manages all test components
pub struct TestContext {
    pub temp_dir: TempDir,
    pub transport: Arc<MockTransport>,
    pub dashboard: DashboardState,
    pub services: ServiceFactory,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_bot_config(test_bot_config()).await
    }

    pub async fn with_bot_config(bot_config: BotConfig) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut settings = Settings::default();
        settings.dashboard.web_config_file = temp_dir
            .path()
            .join("web-config.json")
            .to_string_lossy()
            .into_owned();

        let dashboard = DashboardState::new(&settings.dashboard, settings.battery.history_size);
        let transport = Arc::new(MockTransport::new(BOT_ID));

        let services = ServiceFactory::new(
            settings,
            transport.clone(),
            BotConfigStore::in_memory(bot_config),
            Arc::new(dashboard.clone()),
            Arc::new(dashboard.clone()),
        );

        services
            .dashboard_config
            .reload()
            .await
            .expect("Failed to load dashboard config");

        Self {
            temp_dir,
            transport,
            dashboard,
            services,
        }
    }

    /// Pull the latest dashboard config into the bot cache
    pub async fn sync_config(&self) {
        self.services
            .dashboard_config
            .reload()
            .await
            .expect("Failed to reload dashboard config");
    }
}
