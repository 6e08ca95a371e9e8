//! Data models module
//!
//! This module contains the data structures persisted to the config files,
//! exchanged with the dashboard, and reported by the chat transport.

pub mod battery;
pub mod bot_config;
pub mod command;
pub mod events;
pub mod group;
pub mod status;
pub mod web_config;

pub use battery::{BatteryReading, BatteryStats, BatterySummary};
pub use bot_config::BotConfig;
pub use command::{canonical_command_name, CommandUpdate, CustomCommand, NewCommand};
pub use events::DashboardEvent;
pub use group::{GroupMetadata, GroupSummary, Participant, Role};
pub use status::{BotStatus, StatusUpdate};
pub use web_config::{DashboardSettings, DonationInfo, DonationPatch, SettingsPatch, WebConfig};
