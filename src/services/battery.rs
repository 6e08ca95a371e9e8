//! Device battery telemetry
//!
//! The bot usually runs on a phone; readings come from an external command
//! (`termux-battery-status` by default) that prints a JSON object.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use super::status::StatusSync;
use crate::config::BatteryConfig;
use crate::models::BatteryReading;
use crate::utils::errors::{GroupWardenError, Result};

/// Something that can report the device battery state
#[async_trait]
pub trait BatterySource: Send + Sync {
    async fn read(&self) -> Result<BatteryReading>;
}

/// Runs a command and parses its JSON output
#[derive(Debug, Clone)]
pub struct CommandBatterySource {
    program: String,
    args: Vec<String>,
}

impl CommandBatterySource {
    pub fn new(config: &BatteryConfig) -> Result<Self> {
        let mut parts = config.command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| GroupWardenError::Config("battery command is empty".to_string()))?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

#[async_trait]
impl BatterySource for CommandBatterySource {
    async fn read(&self) -> Result<BatteryReading> {
        let output = Command::new(&self.program).args(&self.args).output().await?;

        if !output.status.success() {
            return Err(GroupWardenError::ServiceUnavailable(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        parse_reading(&String::from_utf8_lossy(&output.stdout), Utc::now())
    }
}

#[derive(Debug, Deserialize)]
struct RawBatteryStatus {
    percentage: Option<f64>,
    status: Option<String>,
    plugged: Option<String>,
    temperature: Option<f64>,
    health: Option<String>,
    voltage: Option<u32>,
    technology: Option<String>,
}

/// Parse the JSON printed by the battery command
pub fn parse_reading(raw: &str, timestamp: DateTime<Utc>) -> Result<BatteryReading> {
    let parsed: RawBatteryStatus = serde_json::from_str(raw.trim())?;

    let status = parsed.status.filter(|s| !s.is_empty());
    let is_charging = status.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("charging"))
        || parsed
            .plugged
            .as_deref()
            .is_some_and(|p| !p.is_empty() && !p.eq_ignore_ascii_case("unplugged"));

    Ok(BatteryReading {
        timestamp,
        level: parsed.percentage.map(|p| p.clamp(0.0, 100.0).round() as u8),
        is_charging,
        temperature: parsed.temperature,
        status,
        health: parsed.health,
        voltage: parsed.voltage,
        technology: parsed.technology,
    })
}

/// Polls a [`BatterySource`] and publishes readings with the bot status
#[derive(Clone)]
pub struct BatteryMonitor {
    source: Arc<dyn BatterySource>,
    status: StatusSync,
}

impl BatteryMonitor {
    pub fn new(source: Arc<dyn BatterySource>, status: StatusSync) -> Self {
        Self { source, status }
    }

    /// Take one reading; failures are logged and skipped
    pub async fn poll(&self) {
        match self.source.read().await {
            Ok(reading) => {
                debug!(level = ?reading.level, charging = reading.is_charging, "Battery reading");
                self.status.tracker().set_battery(reading);
                self.status.publish().await;
            }
            Err(e) => warn!(error = %e, "Failed to read battery status"),
        }
    }
}
