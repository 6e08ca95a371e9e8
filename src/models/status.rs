//! Live bot status mirrored on the dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::battery::BatteryReading;
use super::group::GroupSummary;

/// Process-wide bot status, rebuilt on every reconnect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotStatus {
    pub connected: bool,
    pub total_messages: u64,
    pub groups: Vec<GroupSummary>,
    pub connection_time: Option<DateTime<Utc>>,
    pub last_welcome: Option<DateTime<Utc>>,
    pub last_update: DateTime<Utc>,
    #[serde(default)]
    pub battery: Option<BatteryReading>,
}

impl Default for BotStatus {
    fn default() -> Self {
        Self {
            connected: false,
            total_messages: 0,
            groups: Vec::new(),
            connection_time: None,
            last_welcome: None,
            last_update: Utc::now(),
            battery: None,
        }
    }
}

/// Partial status pushed by the bot; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub connected: Option<bool>,
    pub total_messages: Option<u64>,
    pub groups: Option<Vec<GroupSummary>>,
    pub connection_time: Option<DateTime<Utc>>,
    pub last_welcome: Option<DateTime<Utc>>,
    pub battery: Option<BatteryReading>,
}

impl From<BotStatus> for StatusUpdate {
    fn from(status: BotStatus) -> Self {
        Self {
            connected: Some(status.connected),
            total_messages: Some(status.total_messages),
            groups: Some(status.groups),
            connection_time: status.connection_time,
            last_welcome: status.last_welcome,
            battery: status.battery,
        }
    }
}

impl BotStatus {
    /// Merge a pushed update and stamp `last_update`.
    ///
    /// A disconnected update clears `connection_time`.
    pub fn apply(&mut self, update: StatusUpdate, now: DateTime<Utc>) {
        if let Some(connected) = update.connected {
            self.connected = connected;
            if !connected {
                self.connection_time = None;
            }
        }
        if let Some(total) = update.total_messages {
            self.total_messages = total;
        }
        if let Some(groups) = update.groups {
            self.groups = groups;
        }
        if update.connection_time.is_some() {
            self.connection_time = update.connection_time;
        }
        if update.last_welcome.is_some() {
            self.last_welcome = update.last_welcome;
        }
        if update.battery.is_some() {
            self.battery = update.battery;
        }
        self.last_update = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_absent_fields() {
        let now = Utc::now();
        let mut status = BotStatus {
            total_messages: 7,
            ..Default::default()
        };
        status.apply(
            StatusUpdate {
                connected: Some(true),
                connection_time: Some(now),
                ..Default::default()
            },
            now,
        );
        assert!(status.connected);
        assert_eq!(status.total_messages, 7);
        assert_eq!(status.connection_time, Some(now));
        assert_eq!(status.last_update, now);
    }

    #[test]
    fn test_disconnect_clears_connection_time() {
        let now = Utc::now();
        let mut status = BotStatus {
            connected: true,
            connection_time: Some(now),
            ..Default::default()
        };
        status.apply(
            StatusUpdate {
                connected: Some(false),
                ..Default::default()
            },
            now,
        );
        assert!(!status.connected);
        assert!(status.connection_time.is_none());
    }
}
