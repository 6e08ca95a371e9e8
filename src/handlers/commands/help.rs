//! Help and rules command handlers

use super::CommandContext;
use crate::handlers::texts;
use crate::models::{CustomCommand, DonationInfo};
use crate::utils::errors::Result;

/// Handle the help command
pub async fn handle_help(ctx: &CommandContext<'_>) -> Result<()> {
    let is_admin = ctx.is_authorized().await;
    let config = ctx.services.dashboard_config.snapshot();
    let mut text = help_text(&ctx.prefix, is_admin, &config.custom_commands);
    append_donation_footer(&mut text, &config.donation, &ctx.prefix);
    ctx.reply(text).await
}

/// Handle the rules command
pub async fn handle_rules(ctx: &CommandContext<'_>) -> Result<()> {
    let mut text = texts::RULES.to_string();
    append_donation_footer(&mut text, &ctx.services.dashboard_config.donation(), &ctx.prefix);
    ctx.reply(text).await
}

fn append_donation_footer(text: &mut String, donation: &DonationInfo, prefix: &str) {
    if donation.is_available() {
        text.push_str(&texts::donation_footer(&donation.message, prefix));
    }
}

pub fn help_text(prefix: &str, is_admin: bool, custom: &[CustomCommand]) -> String {
    let mut text = format!(
        "🤖 *Bot Commands*\n\n\
         *For administrators:*\n\
         • `{prefix}kick @user` - Remove a user from the group\n\
         • `{prefix}remover @user` - Remove a user from the group"
    );

    if is_admin {
        text.push_str(&format!(
            "\n• `{prefix}debug` - Technical information about the bot\n\
             • `{prefix}testmention @user` - Test mention detection\n\
             • `{prefix}botadmin` - Check the bot's role in this group\n\
             • `{prefix}reload` - Reload configuration"
        ));
    }

    text.push_str(&format!(
        "\n\n*General:*\n\
         • `{prefix}help` - Show this message\n\
         • `{prefix}rules` - Show the group rules\n\
         • `{prefix}pix` - How to support the bot\n\
         • `{prefix}testowner` - Check how your permissions are resolved"
    ));

    let visible: Vec<&CustomCommand> = custom.iter().filter(|c| is_admin || !c.admin_only).collect();
    if !visible.is_empty() {
        text.push_str("\n\n*Custom commands:*");
        for command in visible {
            let description = if command.description.is_empty() {
                String::new()
            } else {
                format!(" - {}", command.description)
            };
            let marker = if command.admin_only { " 🔒" } else { "" };
            text.push_str(&format!("\n• `{prefix}{}`{description}{marker}", command.command));
        }
    }

    text.push_str(
        "\n\n*Automatic features:*\n\
         ✅ Welcome message for new members\n\
         ✅ Administrative moderation\n\n",
    );

    text.push_str(if is_admin {
        "👨‍💼 *You are an administrator - all commands available*"
    } else {
        "💡 *You are not an administrator - some commands are hidden*"
    });

    text
}
