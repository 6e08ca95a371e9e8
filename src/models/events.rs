//! Messages pushed to connected dashboard clients

use serde::{Deserialize, Serialize};

use super::battery::BatteryReading;
use super::status::BotStatus;
use super::web_config::WebConfig;

/// Realtime event, serialized as `{"type": ..., "data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DashboardEvent {
    BotStatus(BotStatus),
    ConfigUpdated(WebConfig),
    BatteryStatus(BatteryReading),
}

impl DashboardEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardEvent::BotStatus(_) => "bot_status",
            DashboardEvent::ConfigUpdated(_) => "config_updated",
            DashboardEvent::BatteryStatus(_) => "battery_status",
        }
    }
}
