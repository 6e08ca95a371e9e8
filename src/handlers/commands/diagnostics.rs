//! Diagnostic command handlers: debug, testmention, testowner, botadmin

use chrono::Utc;
use tracing::debug;

use super::CommandContext;
use crate::services::admin::group_role;
use crate::transport::jid;
use crate::utils::errors::Result;
use crate::utils::helpers::{bullet_list, format_relative_time};

const NOT_AVAILABLE: &str = "not available";

fn own_number_label(ctx: &CommandContext<'_>) -> String {
    ctx.services
        .admin_resolver
        .own_number()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Handle the debug command
pub async fn handle_debug(ctx: &CommandContext<'_>) -> Result<()> {
    let config = ctx.services.bot_config.snapshot();
    let group_id = &ctx.message.conversation_id;

    let group_admins = match ctx.services.transport.group_metadata(group_id).await {
        Ok(metadata) => {
            let admins: Vec<String> = metadata.admins().map(|p| jid::canonical_number(&p.id)).collect();
            format!(
                "\n👥 *Group admins:* {} found\n{}",
                admins.len(),
                bullet_list(&admins, "   • none")
            )
        }
        Err(e) => {
            debug!(group_id = %group_id, error = %e, "Debug command could not fetch metadata");
            "\n⚠️ *Could not fetch the group admins*".to_string()
        }
    };

    let owner = if config.owner_number.is_empty() {
        "not configured".to_string()
    } else {
        config.owner_number.clone()
    };
    let connected_since = ctx
        .services
        .status
        .tracker()
        .snapshot()
        .connection_time
        .map(|at| format_relative_time(at, Utc::now()))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let admins = if config.admins.is_empty() {
        "none".to_string()
    } else {
        config.admins.iter().cloned().collect::<Vec<_>>().join(", ")
    };

    let text = format!(
        "🔧 *Debug Information*\n\n\
         📱 *Your number:* {sender}\n\
         👑 *Configured owner:* {owner}\n\
         📋 *Configured admins:* {admins}\n\
         🤖 *Connected bot number:* {bot}\n\
         🔌 *Connected since:* {connected_since}\n\
         📍 *Group ID:* {group_id}{group_admins}\n\n\
         💡 *Admin sources:*\n\
         ✅ Owner of the connected number\n\
         ✅ Owner configured in the config file\n\
         ✅ Admins configured in the config file\n\
         ✅ Admins of the current group\n\n\
         💡 To test mentions: `{prefix}testmention @user`",
        sender = ctx.sender_number(),
        bot = own_number_label(ctx),
        prefix = ctx.prefix,
    );

    ctx.reply(text).await
}

/// Handle the testmention command
pub async fn handle_test_mention(ctx: &CommandContext<'_>) -> Result<()> {
    let message = ctx.message;
    let found = match message.mention_target() {
        Some(target) => format!("✅ Mention found: {}", jid::canonical_number(target)),
        None => "❌ No mention detected".to_string(),
    };

    let text = format!(
        "🧪 *Mention Test*\n\n{found}\n\n\
         📋 *Message metadata:*\n\
         • Mentions: {mentions}\n\
         • Quoted author: {quoted}\n\
         • Arguments: {args}\n\n\
         💡 If the mention was not detected:\n\
         1. Mention by tapping the user's name\n\
         2. Or reply to one of their messages",
        mentions = if message.mentioned_ids.is_empty() {
            "none".to_string()
        } else {
            message.mentioned_ids.join(", ")
        },
        quoted = message.quoted_author.as_deref().unwrap_or("none"),
        args = if ctx.command.args.is_empty() {
            "none".to_string()
        } else {
            ctx.command.args.join(" ")
        },
    );

    ctx.reply(text).await
}

/// Handle the testowner command
pub async fn handle_test_owner(ctx: &CommandContext<'_>) -> Result<()> {
    let sender = ctx.sender_number();
    let bot = ctx.services.admin_resolver.own_number();
    let is_connected_account = bot.as_deref() == Some(sender.as_str());

    let source = ctx
        .services
        .admin_resolver
        .resolve(&ctx.message.sender_id, Some(&ctx.message.conversation_id))
        .await;

    let text = format!(
        "🧪 *Owner Test*\n\n\
         📱 *Your number:* {sender}\n\
         🤖 *Bot number:* {bot}\n\
         {owner_line}\n\
         🔑 *Authorization:* {auth}",
        bot = bot.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        owner_line = if is_connected_account {
            "✅ You own the connected number"
        } else {
            "❌ You do not own the connected number"
        },
        auth = source
            .map(|s| format!("granted as {}", s))
            .unwrap_or_else(|| "none".to_string()),
    );

    ctx.reply(text).await
}

/// Handle the botadmin command
pub async fn handle_bot_admin(ctx: &CommandContext<'_>) -> Result<()> {
    let group_id = &ctx.message.conversation_id;
    let Some(own) = ctx.services.admin_resolver.own_number() else {
        return ctx.reply("❌ The bot is not connected").await;
    };

    let text = match ctx.services.transport.group_metadata(group_id).await {
        Ok(metadata) => match group_role(&metadata, &own) {
            Some(role) if role.is_admin() => format!("✅ The bot is a group {} and can moderate", role),
            Some(role) => format!(
                "⚠️ The bot is a group {}. Promote it to admin to enable moderation.",
                role
            ),
            None => format!("❌ The bot ({}) was not found among the group participants", own),
        },
        Err(e) => format!("❌ Could not fetch group information: {}", e),
    };

    ctx.reply(text).await
}
