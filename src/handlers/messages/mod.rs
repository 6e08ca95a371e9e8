//! Message handlers module
//!
//! Handles incoming chat messages and group membership changes.

use chrono::Utc;
use tracing::{debug, error, info};

use crate::handlers::commands::{self, DispatchOutcome};
use crate::handlers::texts;
use crate::services::{ServiceFactory, WelcomeDecision};
use crate::transport::{IncomingMessage, OutgoingMessage, ParticipantAction, ParticipantsUpdate};
use crate::utils::logging;

/// Handle an incoming message: count it, dispatch commands, publish status
pub async fn handle_message(services: &ServiceFactory, message: &IncomingMessage) -> Option<DispatchOutcome> {
    let total = services.status.tracker().increment_messages();
    debug!(
        conversation = %message.conversation_id,
        from_me = message.from_me,
        total = total,
        "Processing message"
    );

    let outcome = match commands::dispatch(services, message).await {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            error!(
                error = %e,
                conversation = %message.conversation_id,
                "Failed to handle command"
            );
            None
        }
    };

    services.status.publish().await;
    outcome
}

/// What happened with a membership change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOutcome {
    NotAnAdd,
    WelcomeDisabled,
    InactiveGroup,
    Refused(WelcomeDecision),
    WelcomeScheduled,
}

/// Handle a group membership change; may schedule a delayed welcome
pub fn handle_participants_update(services: &ServiceFactory, update: &ParticipantsUpdate) -> MembershipOutcome {
    if update.action != ParticipantAction::Add {
        debug!(group_id = %update.group_id, action = ?update.action, "Membership change ignored");
        return MembershipOutcome::NotAnAdd;
    }

    let bot_enabled = services.bot_config.snapshot().auto_welcome;
    let dashboard_enabled = services.dashboard_config.settings().auto_welcome;
    if !bot_enabled || !dashboard_enabled {
        return MembershipOutcome::WelcomeDisabled;
    }

    if !services.dashboard_config.is_group_active(&update.group_id) {
        return MembershipOutcome::InactiveGroup;
    }

    let own_id = services.transport.own_id();
    let decision = services.status.tracker().reserve_welcome(
        &services.welcome_policy,
        own_id.as_deref(),
        &update.participants,
        Utc::now(),
    );

    if !decision.is_allowed() {
        info!(group_id = %update.group_id, joined = update.participants.len(), reason = ?decision, "Welcome suppressed");
        return MembershipOutcome::Refused(decision);
    }

    let task_services = services.clone();
    let group_id = update.group_id.clone();
    services
        .scheduler
        .schedule_after(services.settings.bot.welcome_delay(), async move {
            send_welcome(&task_services, &group_id).await;
        });

    debug!(group_id = %update.group_id, "Welcome scheduled");
    MembershipOutcome::WelcomeScheduled
}

/// Send the rules to a group; the reserved cooldown only sticks on success
async fn send_welcome(services: &ServiceFactory, group_id: &str) {
    match services
        .transport
        .send_message(group_id, OutgoingMessage::text(texts::RULES))
        .await
    {
        Ok(()) => {
            services.status.tracker().confirm_welcome(Utc::now());
            logging::log_group_event(group_id, "welcome_sent", None);
            services.status.publish().await;
        }
        Err(e) => {
            services.status.tracker().release_welcome();
            logging::log_transport_error("send_welcome", &e.to_string(), Some(group_id));
        }
    }
}
