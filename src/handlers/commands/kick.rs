//! Kick command handler
//!
//! Preconditions run in a fixed order and each failure has its own reply.
//! Remove failures are classified by status code and never retried.

use tracing::{info, warn};

use super::CommandContext;
use crate::handlers::texts;
use crate::models::Role;
use crate::services::admin::group_role;
use crate::transport::{jid, TransportError};
use crate::utils::errors::Result;
use crate::utils::logging;

/// Result of a kick attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KickOutcome {
    PermissionDenied,
    MissingTarget,
    BotNotInGroup,
    BotNotAdmin { admins: Vec<String> },
    Removed { target: String },
    Forbidden,
    NotFound,
    Failed(String),
}

impl KickOutcome {
    /// Chat reply for this outcome
    pub fn message(&self, prefix: &str) -> String {
        match self {
            KickOutcome::PermissionDenied => texts::PERMISSION_DENIED.to_string(),
            KickOutcome::MissingTarget => texts::kick_usage(prefix),
            KickOutcome::BotNotInGroup => texts::BOT_NOT_IN_GROUP.to_string(),
            KickOutcome::BotNotAdmin { admins } => texts::bot_not_admin(admins),
            KickOutcome::Removed { target } => texts::removed(&jid::mention_text(target)),
            KickOutcome::Forbidden => texts::REMOVE_FORBIDDEN.to_string(),
            KickOutcome::NotFound => texts::REMOVE_NOT_FOUND.to_string(),
            KickOutcome::Failed(details) => texts::remove_failed(details),
        }
    }
}

fn classify_remove_error(error: &TransportError) -> KickOutcome {
    match error.status() {
        Some(403) => KickOutcome::Forbidden,
        Some(404) => KickOutcome::NotFound,
        _ => KickOutcome::Failed(error.to_string()),
    }
}

/// Run the kick flow without replying
pub async fn kick(ctx: &CommandContext<'_>) -> KickOutcome {
    if !ctx.is_authorized().await {
        return KickOutcome::PermissionDenied;
    }

    let Some(target) = ctx.message.mention_target() else {
        return KickOutcome::MissingTarget;
    };
    let target = if target.contains('@') {
        target.to_string()
    } else {
        jid::user_jid(&jid::canonical_number(target))
    };

    let group_id = ctx.message.conversation_id.as_str();
    let transport = &ctx.services.transport;

    let metadata = match transport.group_metadata(group_id).await {
        Ok(metadata) => metadata,
        Err(e) => {
            logging::log_transport_error("group_metadata", &e.to_string(), Some(group_id));
            return KickOutcome::Failed(e.to_string());
        }
    };

    let bot_role = ctx
        .services
        .admin_resolver
        .own_number()
        .and_then(|own| group_role(&metadata, &own));

    match bot_role {
        None => return KickOutcome::BotNotInGroup,
        Some(Role::Member) => {
            let admins = metadata
                .admins()
                .map(|p| jid::canonical_number(&p.id))
                .collect();
            return KickOutcome::BotNotAdmin { admins };
        }
        Some(_) => {}
    }

    match transport.remove_participant(group_id, &target).await {
        Ok(()) => KickOutcome::Removed { target },
        Err(e) => {
            warn!(group_id = group_id, target = %target, error = %e, "Failed to remove participant");
            classify_remove_error(&e)
        }
    }
}

/// Handle the kick command
pub async fn handle_kick(ctx: &CommandContext<'_>) -> Result<()> {
    let outcome = kick(ctx).await;

    if let KickOutcome::Removed { target } = &outcome {
        info!(group_id = %ctx.message.conversation_id, target = %target, "Participant removed");
        if ctx.services.dashboard_config.settings().log_actions {
            logging::log_admin_action(
                &ctx.sender_number(),
                "kick",
                Some(&jid::canonical_number(target)),
                &ctx.message.conversation_id,
            );
        }
        return ctx
            .reply_mentioning(outcome.message(&ctx.prefix), vec![target.clone()])
            .await;
    }

    ctx.reply(outcome.message(&ctx.prefix)).await
}
