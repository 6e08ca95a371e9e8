//! Donation command handler

use tracing::debug;

use super::CommandContext;
use crate::handlers::texts;
use crate::utils::errors::Result;

/// Reply with the PIX donation details, or a notice when donations are off
pub async fn handle_donation(ctx: &CommandContext<'_>) -> Result<()> {
    let donation = ctx.services.dashboard_config.donation();
    if !donation.is_available() {
        debug!(sender = %ctx.sender_number(), "Donation requested while disabled");
        return ctx.reply(texts::DONATION_UNAVAILABLE).await;
    }

    ctx.reply(texts::donation(&donation)).await
}
