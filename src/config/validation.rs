//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{GroupWardenError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_settings(&settings.bot)?;
    validate_gateway_config(&settings.gateway)?;
    validate_dashboard_config(&settings.dashboard)?;
    validate_logging_config(&settings.logging)?;

    if settings.battery.enabled {
        validate_battery_config(&settings.battery)?;
    }

    Ok(())
}

/// Validate bot behaviour settings
fn validate_bot_settings(config: &super::BotSettings) -> Result<()> {
    if config.config_file.is_empty() {
        return Err(GroupWardenError::Config(
            "Bot config file path is required".to_string()
        ));
    }

    if config.max_welcome_batch == 0 {
        return Err(GroupWardenError::Config(
            "Max welcome batch must be greater than 0".to_string()
        ));
    }

    if config.reload_interval_seconds == 0 {
        return Err(GroupWardenError::Config(
            "Reload interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate gateway configuration
fn validate_gateway_config(config: &super::GatewayConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(GroupWardenError::Config(
            "Gateway base URL is required".to_string()
        ));
    }

    if config.events_url.is_empty() {
        return Err(GroupWardenError::Config(
            "Gateway events URL is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(GroupWardenError::Config(
            "Gateway timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate dashboard configuration
fn validate_dashboard_config(config: &super::DashboardConfig) -> Result<()> {
    if config.http_port == 0 || config.ws_port == 0 {
        return Err(GroupWardenError::Config(
            "Dashboard ports must be greater than 0".to_string()
        ));
    }

    if config.http_port == config.ws_port {
        return Err(GroupWardenError::Config(
            "Dashboard HTTP and WebSocket ports must differ".to_string()
        ));
    }

    if !config.enabled && config.remote_url.is_empty() {
        return Err(GroupWardenError::Config(
            "Remote dashboard URL is required when the dashboard is not embedded".to_string()
        ));
    }

    if config.web_config_file.is_empty() {
        return Err(GroupWardenError::Config(
            "Web config file path is required".to_string()
        ));
    }

    if config.sync_timeout_seconds == 0 {
        return Err(GroupWardenError::Config(
            "Dashboard sync timeout must be greater than 0".to_string()
        ));
    }

    if config.event_buffer == 0 {
        return Err(GroupWardenError::Config(
            "Dashboard event buffer must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate battery telemetry configuration
fn validate_battery_config(config: &super::BatteryConfig) -> Result<()> {
    if config.command.is_empty() {
        return Err(GroupWardenError::Config(
            "Battery command is required".to_string()
        ));
    }

    if config.poll_interval_seconds == 0 || config.history_size == 0 {
        return Err(GroupWardenError::Config(
            "Battery poll interval and history size must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GroupWardenError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GroupWardenError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
