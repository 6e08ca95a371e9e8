//! Configuration management module
//!
//! This module handles loading and validation of application configuration
//! from TOML files and environment variables, and the hand-edited bot admin
//! file.

pub mod bot_config;
pub mod settings;
pub mod validation;

pub use bot_config::BotConfigStore;
pub use settings::{BatteryConfig, BotSettings, DashboardConfig, GatewayConfig, LoggingConfig, Settings};
