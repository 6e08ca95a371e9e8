//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub bot: BotSettings,
    pub gateway: GatewayConfig,
    pub dashboard: DashboardConfig,
    pub battery: BatteryConfig,
    pub logging: LoggingConfig,
}

/// Bot behaviour configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BotSettings {
    /// JSON file holding the owner and admin numbers
    pub config_file: String,
    pub welcome_delay_ms: u64,
    pub startup_grace_seconds: u64,
    pub welcome_cooldown_seconds: u64,
    pub max_welcome_batch: usize,
    pub reload_interval_seconds: u64,
    pub reconnect_delay_ms: u64,
}

/// WhatsApp gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub events_url: String,
    pub timeout_seconds: u64,
}

/// Web dashboard configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Run the dashboard inside the bot process
    pub enabled: bool,
    pub host: String,
    pub http_port: u16,
    pub ws_port: u16,
    /// Dashboard address used when it runs as a separate process
    pub remote_url: String,
    pub web_config_file: String,
    pub static_dir: String,
    pub sync_timeout_seconds: u64,
    pub event_buffer: usize,
}

/// Battery telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BatteryConfig {
    pub enabled: bool,
    pub command: String,
    pub poll_interval_seconds: u64,
    pub history_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("GROUPWARDEN").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GroupWardenError> {
        super::validation::validate_settings(self)
    }
}

impl BotSettings {
    pub fn welcome_delay(&self) -> Duration {
        Duration::from_millis(self.welcome_delay_ms)
    }

    pub fn reload_interval(&self) -> Duration {
        Duration::from_secs(self.reload_interval_seconds)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

impl DashboardConfig {
    pub fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_seconds)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotSettings::default(),
            gateway: GatewayConfig::default(),
            dashboard: DashboardConfig::default(),
            battery: BatteryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            config_file: "config.json".to_string(),
            welcome_delay_ms: 3_000,
            startup_grace_seconds: 120,
            welcome_cooldown_seconds: 10,
            max_welcome_batch: 5,
            reload_interval_seconds: 30,
            reconnect_delay_ms: 3_000,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            events_url: "ws://localhost:8080/events".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "0.0.0.0".to_string(),
            http_port: 3000,
            ws_port: 3001,
            remote_url: "http://localhost:3000".to_string(),
            web_config_file: "web-config.json".to_string(),
            static_dir: "web/public".to_string(),
            sync_timeout_seconds: 5,
            event_buffer: 64,
        }
    }
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: "termux-battery-status".to_string(),
            poll_interval_seconds: 60,
            history_size: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: "logs".to_string(),
        }
    }
}
