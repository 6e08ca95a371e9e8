//! Reload command handler

use tracing::info;

use super::CommandContext;
use crate::utils::errors::Result;

/// Handle the reload command: bot config file and dashboard config, immediately
pub async fn handle_reload(ctx: &CommandContext<'_>) -> Result<()> {
    let services = ctx.services;

    let bot_line = match services.bot_config.reload().await {
        Ok(config) => format!(
            "✅ Bot config: {} admin(s), prefix `{}`",
            config.admins.len(),
            config.prefix
        ),
        Err(e) => format!("❌ Bot config: {}", e),
    };

    let dashboard_line = match services.dashboard_config.reload().await {
        Ok(config) => {
            let active = config.active_groups.values().filter(|active| **active).count();
            format!(
                "✅ Dashboard config: {} custom command(s), {} active group(s)",
                config.custom_commands.len(),
                active
            )
        }
        Err(e) => format!("❌ Dashboard config: {} (previous configuration kept)", e),
    };

    info!(sender = %ctx.sender_number(), "Configuration reloaded on request");
    ctx.reply(format!("🔄 *Configuration Reloaded*\n\n{bot_line}\n{dashboard_line}"))
        .await
}
