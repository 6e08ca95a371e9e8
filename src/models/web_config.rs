//! Dashboard-managed configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::command::CustomCommand;

/// State managed through the dashboard and persisted to the web config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebConfig {
    #[serde(default)]
    pub active_groups: HashMap<String, bool>,
    #[serde(default)]
    pub custom_commands: Vec<CustomCommand>,
    #[serde(default)]
    pub settings: DashboardSettings,
    #[serde(default)]
    pub donation: DonationInfo,
}

/// PIX donation details shown by the donation command and footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationInfo {
    #[serde(default)]
    pub pix_key: String,
    #[serde(default = "default_donation_message")]
    pub message: String,
    #[serde(default)]
    pub enabled: bool,
}

fn default_donation_message() -> String {
    "This bot runs 24/7 on a phone via Termux. Keeping it online has costs.".to_string()
}

impl Default for DonationInfo {
    fn default() -> Self {
        Self {
            pix_key: String::new(),
            message: default_donation_message(),
            enabled: false,
        }
    }
}

impl DonationInfo {
    /// Enabled with a key to show
    pub fn is_available(&self) -> bool {
        self.enabled && !self.pix_key.trim().is_empty()
    }

    pub fn merge(&mut self, patch: DonationPatch) {
        if let Some(key) = patch.pix_key {
            self.pix_key = key.trim().to_string();
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
    }
}

/// Partial donation update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationPatch {
    pub pix_key: Option<String>,
    pub message: Option<String>,
    pub enabled: Option<bool>,
}

/// General bot settings toggled from the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    #[serde(default = "enabled")]
    pub auto_welcome: bool,
    #[serde(default)]
    pub anti_spam: bool,
    #[serde(default = "enabled")]
    pub log_actions: bool,
}

fn enabled() -> bool {
    true
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            auto_welcome: true,
            anti_spam: false,
            log_actions: true,
        }
    }
}

/// Partial settings update, merged over the current settings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub auto_welcome: Option<bool>,
    pub anti_spam: Option<bool>,
    pub log_actions: Option<bool>,
}

impl DashboardSettings {
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(value) = patch.auto_welcome {
            self.auto_welcome = value;
        }
        if let Some(value) = patch.anti_spam {
            self.anti_spam = value;
        }
        if let Some(value) = patch.log_actions {
            self.log_actions = value;
        }
    }
}

impl WebConfig {
    /// Groups absent from the map are active
    pub fn is_group_active(&self, group_id: &str) -> bool {
        self.active_groups.get(group_id).copied().unwrap_or(true)
    }

    /// Exact match on the canonical command name
    pub fn find_command(&self, name: &str) -> Option<&CustomCommand> {
        self.custom_commands.iter().find(|c| c.command == name)
    }

    pub fn find_command_mut(&mut self, name: &str) -> Option<&mut CustomCommand> {
        self.custom_commands.iter_mut().find(|c| c.command == name)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.custom_commands.iter().position(|c| c.id == id)
    }
}
