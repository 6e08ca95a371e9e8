//! Bot admin configuration model

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Owner and admin numbers, edited by hand in the bot config file.
///
/// Numbers are stored in canonical form: digits only, no domain suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    #[serde(default)]
    pub owner_number: String,
    #[serde(default)]
    pub admins: BTreeSet<String>,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_auto_welcome")]
    pub auto_welcome: bool,
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_auto_welcome() -> bool {
    true
}

impl BotConfig {
    /// Placeholder configuration written on first run
    pub fn example() -> Self {
        Self {
            owner_number: "5511999999999".to_string(),
            admins: ["5511999999999", "5511888888888"]
                .into_iter()
                .map(String::from)
                .collect(),
            prefix: default_prefix(),
            auto_welcome: true,
        }
    }

    /// True if the number is the configured owner
    pub fn is_owner(&self, number: &str) -> bool {
        !self.owner_number.is_empty() && self.owner_number == number
    }

    /// True if the number is in the configured admin list
    pub fn is_configured_admin(&self, number: &str) -> bool {
        self.admins.contains(number)
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            owner_number: String::new(),
            admins: BTreeSet::new(),
            prefix: default_prefix(),
            auto_welcome: default_auto_welcome(),
        }
    }
}
