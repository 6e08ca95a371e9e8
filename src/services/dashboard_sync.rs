//! Bot ↔ dashboard synchronisation
//!
//! The bot talks to the dashboard through two seams: [`StatusPublisher`]
//! (push live status) and [`ConfigSource`] (pull dashboard configuration).
//! When the dashboard runs in-process its state implements both directly;
//! otherwise [`HttpDashboard`] reaches it over its REST API with a bounded
//! request timeout. The choice is made once, at composition time.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::config::DashboardConfig;
use crate::dashboard::response::{ApiResponse, GroupsOverview};
use crate::models::{BotStatus, CustomCommand, DashboardSettings, DonationInfo, StatusUpdate, WebConfig};
use crate::utils::errors::{GroupWardenError, Result};
use crate::utils::logging;

/// Receives live bot status
#[async_trait]
pub trait StatusPublisher: Send + Sync {
    async fn publish_status(&self, status: &BotStatus) -> Result<()>;
}

/// Provides dashboard-managed configuration to the bot
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch_config(&self) -> Result<WebConfig>;

    /// Count one successful use of a custom command
    async fn record_usage(&self, command_id: &str) -> Result<()>;
}

/// Dashboard reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpDashboard {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpDashboard {
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        Self::with_timeout(&config.remote_url, config.sync_timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("GroupWarden-Bot/1.0")
            .build()
            .map_err(GroupWardenError::Http)?;

        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
            timeout,
        })
    }

    /// Bound applied to every dashboard request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.endpoint(path)?)
            .send()
            .await?
            .error_for_status()?;
        unwrap_envelope(response.json::<ApiResponse<T>>().await?)
    }
}

fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T> {
    if !envelope.success {
        return Err(GroupWardenError::Dashboard(
            envelope.error.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| GroupWardenError::Dashboard("response carried no data".to_string()))
}

#[async_trait]
impl StatusPublisher for HttpDashboard {
    async fn publish_status(&self, status: &BotStatus) -> Result<()> {
        let update = StatusUpdate::from(status.clone());
        self.client
            .put(self.endpoint("api/status")?)
            .json(&update)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl ConfigSource for HttpDashboard {
    /// Fetch every config endpoint concurrently; all of them must succeed
    async fn fetch_config(&self) -> Result<WebConfig> {
        let (settings, custom_commands, groups, donation) = tokio::try_join!(
            self.get::<DashboardSettings>("api/settings"),
            self.get::<Vec<CustomCommand>>("api/commands"),
            self.get::<GroupsOverview>("api/groups"),
            self.get::<DonationInfo>("api/donation"),
        )?;

        Ok(WebConfig {
            active_groups: groups.active_groups,
            custom_commands,
            settings,
            donation,
        })
    }

    async fn record_usage(&self, command_id: &str) -> Result<()> {
        let path = format!("api/commands/{}/usage", urlencoding::encode(command_id));
        self.client
            .post(self.endpoint(&path)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Bot-side cache of the dashboard configuration.
///
/// A failed reload keeps the previously cached configuration.
#[derive(Clone)]
pub struct DashboardConfigCache {
    source: Arc<dyn ConfigSource>,
    current: Arc<RwLock<WebConfig>>,
}

impl DashboardConfigCache {
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        Self {
            source,
            current: Arc::new(RwLock::new(WebConfig::default())),
        }
    }

    /// Replace the cache with a fresh copy from the source
    pub async fn reload(&self) -> Result<WebConfig> {
        match self.source.fetch_config().await {
            Ok(config) => {
                debug!(commands = config.custom_commands.len(), "Dashboard configuration reloaded");
                self.replace(config.clone());
                Ok(config)
            }
            Err(e) => {
                logging::log_sync_failure("reload_config", &e.to_string());
                Err(e)
            }
        }
    }

    fn replace(&self, config: WebConfig) {
        match self.current.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    pub fn snapshot(&self) -> WebConfig {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn settings(&self) -> DashboardSettings {
        self.snapshot().settings
    }

    pub fn donation(&self) -> DonationInfo {
        self.snapshot().donation
    }

    pub fn is_group_active(&self, group_id: &str) -> bool {
        self.snapshot().is_group_active(group_id)
    }

    pub fn find_command(&self, name: &str) -> Option<CustomCommand> {
        self.snapshot().find_command(name).cloned()
    }

    /// Look up a command, reloading once if it is not cached yet
    pub async fn find_command_or_reload(&self, name: &str) -> Option<CustomCommand> {
        if let Some(command) = self.find_command(name) {
            return Some(command);
        }

        self.reload().await.ok()?;
        let found = self.find_command(name);
        if found.is_some() {
            info!(command = name, "Custom command found after reload");
        }
        found
    }

    /// Bump usage locally and at the source; source failures are logged only
    pub async fn record_usage(&self, command: &CustomCommand) {
        {
            let mut guard = match self.current.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Some(cached) = guard.find_command_mut(&command.command) {
                cached.usage += 1;
            }
        }

        if let Err(e) = self.source.record_usage(&command.id).await {
            logging::log_sync_failure("record_usage", &e.to_string());
        }
    }
}
