//! Services module
//!
//! This module contains the business logic services shared by the bot
//! handlers and the dashboard.

pub mod admin;
pub mod battery;
pub mod dashboard_sync;
pub mod scheduler;
pub mod status;
pub mod web_config;
pub mod welcome;

// Re-export commonly used services
pub use admin::{AdminResolver, AuthorizationSource};
pub use battery::{BatteryMonitor, BatterySource, CommandBatterySource};
pub use dashboard_sync::{ConfigSource, DashboardConfigCache, HttpDashboard, StatusPublisher};
pub use scheduler::Scheduler;
pub use status::{StatusSync, StatusTracker};
pub use web_config::WebConfigStore;
pub use welcome::{WelcomeDecision, WelcomePolicy};

use std::sync::Arc;

use crate::config::{BotConfigStore, Settings};
use crate::transport::ChatTransport;

/// Service factory wiring every bot-side service together
#[derive(Clone)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub transport: Arc<dyn ChatTransport>,
    pub bot_config: BotConfigStore,
    pub admin_resolver: AdminResolver,
    pub dashboard_config: DashboardConfigCache,
    pub status: StatusSync,
    pub scheduler: Scheduler,
    pub welcome_policy: WelcomePolicy,
}

impl ServiceFactory {
    /// Create a new ServiceFactory; the dashboard link is chosen by the caller
    pub fn new(
        settings: Settings,
        transport: Arc<dyn ChatTransport>,
        bot_config: BotConfigStore,
        publisher: Arc<dyn StatusPublisher>,
        config_source: Arc<dyn ConfigSource>,
    ) -> Self {
        let admin_resolver = AdminResolver::new(bot_config.clone(), transport.clone());
        let dashboard_config = DashboardConfigCache::new(config_source);
        let status = StatusSync::new(StatusTracker::new(), publisher);
        let welcome_policy = WelcomePolicy::from(&settings.bot);

        Self {
            settings,
            transport,
            bot_config,
            admin_resolver,
            dashboard_config,
            status,
            scheduler: Scheduler::new(),
            welcome_policy,
        }
    }

    /// Start the periodic dashboard configuration reload
    pub fn start_config_reload(&self) {
        let cache = self.dashboard_config.clone();
        self.scheduler
            .schedule_every("config_reload", self.settings.bot.reload_interval(), move || {
                let cache = cache.clone();
                async move {
                    // Failures are logged by the cache and the previous config kept
                    let _ = cache.reload().await;
                }
            });
    }

    /// Start battery polling with the given source
    pub fn start_battery_monitor(&self, source: Arc<dyn BatterySource>) {
        let monitor = BatteryMonitor::new(source, self.status.clone());
        let period = std::time::Duration::from_secs(self.settings.battery.poll_interval_seconds);
        self.scheduler.schedule_every("battery_poll", period, move || {
            let monitor = monitor.clone();
            async move { monitor.poll().await }
        });
    }
}
