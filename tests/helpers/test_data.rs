//! Test data for identities, groups and messages

use groupwarden::models::{BotConfig, GroupMetadata, Participant, Role};
use groupwarden::transport::IncomingMessage;

pub const BOT_ID: &str = "5511000000000:12@s.whatsapp.net";
pub const OWNER: &str = "5511999999999@s.whatsapp.net";
pub const CONFIGURED_ADMIN: &str = "5511888888888@s.whatsapp.net";
pub const GROUP_ADMIN: &str = "5511777777777@s.whatsapp.net";
pub const MEMBER: &str = "5511666666666@s.whatsapp.net";
pub const TARGET: &str = "5511555555555@s.whatsapp.net";

pub const GROUP: &str = "120363000000000001@g.us";
pub const OTHER_GROUP: &str = "120363000000000002@g.us";

pub fn test_bot_config() -> BotConfig {
    BotConfig {
        owner_number: "5511999999999".to_string(),
        admins: ["5511888888888".to_string()].into_iter().collect(),
        prefix: "!".to_string(),
        auto_welcome: true,
    }
}

/// Group with the bot in the given role, one admin, one member and a target
pub fn group_with_bot(group_id: &str, bot_role: Role) -> GroupMetadata {
    GroupMetadata {
        id: group_id.to_string(),
        subject: "Test Group".to_string(),
        owner: Some(GROUP_ADMIN.to_string()),
        description: None,
        creation: Some(1_700_000_000),
        participants: vec![
            Participant::new("5511000000000@s.whatsapp.net", bot_role),
            Participant::new(GROUP_ADMIN, Role::Admin),
            Participant::new(MEMBER, Role::Member),
            Participant::new(TARGET, Role::Member),
        ],
    }
}

/// Group the bot is not part of
pub fn group_without_bot(group_id: &str) -> GroupMetadata {
    let mut group = group_with_bot(group_id, Role::Member);
    group.participants.remove(0);
    group
}

pub fn group_message(sender: &str, text: &str) -> IncomingMessage {
    IncomingMessage {
        id: "MSG1".to_string(),
        conversation_id: GROUP.to_string(),
        sender_id: sender.to_string(),
        from_me: false,
        text: text.to_string(),
        mentioned_ids: Vec::new(),
        quoted_author: None,
    }
}

pub fn kick_message(sender: &str, target: &str) -> IncomingMessage {
    IncomingMessage {
        mentioned_ids: vec![target.to_string()],
        ..group_message(sender, &format!("!kick @{}", groupwarden::transport::jid::canonical_number(target)))
    }
}
