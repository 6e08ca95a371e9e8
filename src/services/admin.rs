//! Admin resolution service
//!
//! Decides whether a sender holds moderation authority. Checks run in a
//! fixed order and stop at the first grant:
//!
//! 1. configured admin list or configured owner
//! 2. the account the bot is connected as
//! 3. admin or super admin role in the current group (live lookup)
//!
//! A failed group lookup is logged and treated as "no grant"; the resolver
//! never returns an error.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::BotConfigStore;
use crate::models::{GroupMetadata, Role};
use crate::transport::{jid, ChatTransport};
use crate::utils::logging;

/// Which rule granted authority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationSource {
    ConfiguredOwner,
    ConfiguredAdmin,
    ConnectedAccount,
    GroupRole(Role),
}

impl std::fmt::Display for AuthorizationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorizationSource::ConfiguredOwner => write!(f, "configured owner"),
            AuthorizationSource::ConfiguredAdmin => write!(f, "configured admin"),
            AuthorizationSource::ConnectedAccount => write!(f, "owner of the connected number"),
            AuthorizationSource::GroupRole(role) => write!(f, "group {}", role),
        }
    }
}

/// Resolves moderation authority for senders
#[derive(Clone)]
pub struct AdminResolver {
    bot_config: BotConfigStore,
    transport: Arc<dyn ChatTransport>,
}

impl AdminResolver {
    pub fn new(bot_config: BotConfigStore, transport: Arc<dyn ChatTransport>) -> Self {
        Self { bot_config, transport }
    }

    /// True if the sender may run admin-only commands in the conversation
    pub async fn is_authorized(&self, sender_id: &str, conversation_id: Option<&str>) -> bool {
        self.resolve(sender_id, conversation_id).await.is_some()
    }

    /// The rule that grants the sender authority, if any
    pub async fn resolve(&self, sender_id: &str, conversation_id: Option<&str>) -> Option<AuthorizationSource> {
        let number = jid::canonical_number(sender_id);
        let granted = self.resolve_number(&number, conversation_id).await;

        let label = granted.map(|source| source.to_string());
        logging::log_authorization(&number, conversation_id, label.as_deref());
        granted
    }

    async fn resolve_number(&self, number: &str, conversation_id: Option<&str>) -> Option<AuthorizationSource> {
        if number.is_empty() {
            return None;
        }

        if let Some(source) = self.static_grant(number) {
            return Some(source);
        }

        let group_id = conversation_id.filter(|id| jid::is_group(id))?;
        match self.transport.group_metadata(group_id).await {
            Ok(metadata) => group_role(&metadata, number)
                .filter(Role::is_admin)
                .map(AuthorizationSource::GroupRole),
            Err(e) => {
                warn!(group_id = group_id, error = %e, "Failed to fetch group metadata for admin check");
                None
            }
        }
    }

    /// Grants that need no network lookup
    pub fn static_grant(&self, number: &str) -> Option<AuthorizationSource> {
        let config = self.bot_config.snapshot();

        if config.is_configured_admin(number) {
            return Some(AuthorizationSource::ConfiguredAdmin);
        }
        if config.is_owner(number) {
            return Some(AuthorizationSource::ConfiguredOwner);
        }

        let own_number = self.own_number()?;
        if own_number == number {
            debug!(number = number, "Sender is the connected account");
            return Some(AuthorizationSource::ConnectedAccount);
        }

        None
    }

    /// Canonical number of the connected account
    pub fn own_number(&self) -> Option<String> {
        self.transport
            .own_id()
            .map(|id| jid::canonical_number(&id))
            .filter(|n| !n.is_empty())
    }
}

/// Role of the participant matching the number, if present in the group
pub fn group_role(metadata: &GroupMetadata, number: &str) -> Option<Role> {
    metadata
        .participants
        .iter()
        .find(|p| jid::matches_number(&p.id, number))
        .map(|p| p.role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;

    #[test]
    fn test_group_role_lookup() {
        let metadata = GroupMetadata {
            id: "g@g.us".to_string(),
            subject: String::new(),
            owner: None,
            description: None,
            creation: None,
            participants: vec![
                Participant::new("5511000000001@s.whatsapp.net", Role::SuperAdmin),
                Participant::new("5511000000002:7@s.whatsapp.net", Role::Member),
            ],
        };
        assert_eq!(group_role(&metadata, "5511000000001"), Some(Role::SuperAdmin));
        assert_eq!(group_role(&metadata, "5511000000002"), Some(Role::Member));
        assert_eq!(group_role(&metadata, "5511000000003"), None);
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(AuthorizationSource::GroupRole(Role::Admin).to_string(), "group admin");
        assert_eq!(AuthorizationSource::ConfiguredOwner.to_string(), "configured owner");
    }
}
