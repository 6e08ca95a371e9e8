//! Custom command models

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9]").expect("static regex is valid")
});

/// Placeholder replaced with a mention of the sender
pub const USER_PLACEHOLDER: &str = "{user}";

/// Dashboard-authored command/response pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCommand {
    pub id: String,
    pub command: String,
    pub response: String,
    #[serde(default)]
    pub admin_only: bool,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage: u64,
}

/// Request body for creating a custom command
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommand {
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub admin_only: bool,
    #[serde(default)]
    pub description: String,
}

/// Partial update for an existing custom command
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandUpdate {
    pub command: Option<String>,
    pub response: Option<String>,
    pub admin_only: Option<bool>,
    pub description: Option<String>,
}

/// Canonical command name: lowercase ASCII letters and digits only.
///
/// `"Foo!"` becomes `"foo"`. A leading prefix typed by the author is
/// dropped along with any other punctuation.
pub fn canonical_command_name(raw: &str) -> String {
    NON_ALNUM.replace_all(&raw.to_lowercase(), "").into_owned()
}

impl CustomCommand {
    /// Build a command from a creation request with an already canonical name
    pub fn from_request(id: String, command: String, request: NewCommand, now: DateTime<Utc>) -> Self {
        Self {
            id,
            command,
            response: request.response,
            admin_only: request.admin_only,
            description: request.description,
            created_at: now,
            updated_at: None,
            usage: 0,
        }
    }

    /// Response text with `{user}` replaced by the given mention
    pub fn render(&self, mention: &str) -> String {
        self.response.replace(USER_PLACEHOLDER, mention)
    }

    /// True if the response mentions the sender
    pub fn mentions_user(&self) -> bool {
        self.response.contains(USER_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_command_name() {
        assert_eq!(canonical_command_name("Foo!"), "foo");
        assert_eq!(canonical_command_name("!Pix"), "pix");
        assert_eq!(canonical_command_name("regras-grupo 2"), "regrasgrupo2");
        assert_eq!(canonical_command_name("???"), "");
    }

    #[test]
    fn test_render_replaces_every_placeholder() {
        let command = CustomCommand::from_request(
            "1".to_string(),
            "hi".to_string(),
            NewCommand {
                command: "hi".to_string(),
                response: "Hello {user}! Bye {user}".to_string(),
                ..Default::default()
            },
            Utc::now(),
        );
        assert!(command.mentions_user());
        assert_eq!(command.render("@5511"), "Hello @5511! Bye @5511");
        assert_eq!(command.usage, 0);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let command = CustomCommand::from_request(
            "42".to_string(),
            "rules".to_string(),
            NewCommand {
                response: "be nice".to_string(),
                admin_only: true,
                ..Default::default()
            },
            Utc::now(),
        );
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["adminOnly"], true);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_none());
    }
}
