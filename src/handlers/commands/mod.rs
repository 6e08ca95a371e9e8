//! Command handlers module
//!
//! Parses prefixed chat commands and dispatches them. Dashboard-authored
//! custom commands are looked up first and shadow built-ins of the same
//! name; unknown names are ignored without a reply.

pub mod diagnostics;
pub mod donation;
pub mod help;
pub mod kick;
pub mod reload;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::handlers::texts;
use crate::models::CustomCommand;
use crate::services::ServiceFactory;
use crate::transport::{jid, IncomingMessage, OutgoingMessage};
use crate::utils::errors::Result;

/// Built-in commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCommand {
    Help,
    Rules,
    Donation,
    Kick,
    Debug,
    TestMention,
    TestOwner,
    BotAdmin,
    Reload,
}

impl BuiltinCommand {
    /// Resolve a lower-cased command name, including aliases
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "help" | "ajuda" => Some(Self::Help),
            "rules" | "regras" => Some(Self::Rules),
            "pix" | "donate" | "doar" => Some(Self::Donation),
            "kick" | "remover" | "remove" => Some(Self::Kick),
            "debug" => Some(Self::Debug),
            "testmention" => Some(Self::TestMention),
            "testowner" => Some(Self::TestOwner),
            "botadmin" => Some(Self::BotAdmin),
            "reload" => Some(Self::Reload),
            _ => None,
        }
    }

    pub fn requires_admin(&self) -> bool {
        !matches!(self, Self::Help | Self::Rules | Self::Donation | Self::TestOwner)
    }
}

/// A prefixed command split into name and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Split `text` into a command if it starts with `prefix`
pub fn parse_command(text: &str, prefix: &str) -> Option<ParsedCommand> {
    let rest = text.strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    let name = tokens.next()?.to_lowercase();

    Some(ParsedCommand {
        name,
        args: tokens.map(str::to_string).collect(),
    })
}

/// Why a message never reached a command handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotGroup,
    NotCommand,
    InactiveGroup,
}

/// What the dispatcher did with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored(IgnoreReason),
    Custom(String),
    CustomDenied(String),
    Builtin(BuiltinCommand),
    Denied(BuiltinCommand),
    Unknown(String),
}

/// Per-dispatch context handed to command handlers.
///
/// The authorization result is resolved at most once per dispatch.
pub struct CommandContext<'a> {
    pub services: &'a ServiceFactory,
    pub message: &'a IncomingMessage,
    pub command: ParsedCommand,
    pub prefix: String,
    authorized: OnceCell<bool>,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        services: &'a ServiceFactory,
        message: &'a IncomingMessage,
        command: ParsedCommand,
        prefix: String,
    ) -> Self {
        Self {
            services,
            message,
            command,
            prefix,
            authorized: OnceCell::new(),
        }
    }

    pub async fn is_authorized(&self) -> bool {
        *self
            .authorized
            .get_or_init(|| async {
                self.services
                    .admin_resolver
                    .is_authorized(&self.message.sender_id, Some(&self.message.conversation_id))
                    .await
            })
            .await
    }

    pub fn sender_number(&self) -> String {
        jid::canonical_number(&self.message.sender_id)
    }

    /// Reply in the conversation, quoting the triggering message
    pub async fn reply(&self, text: impl Into<String>) -> Result<()> {
        self.send(OutgoingMessage::text(text)).await
    }

    pub async fn reply_mentioning(&self, text: impl Into<String>, mentions: Vec<String>) -> Result<()> {
        self.send(OutgoingMessage::text(text).mentioning(mentions)).await
    }

    async fn send(&self, message: OutgoingMessage) -> Result<()> {
        self.services
            .transport
            .send_message(&self.message.conversation_id, message.quoting(&self.message.id))
            .await?;
        Ok(())
    }
}

/// Main command dispatcher
pub async fn dispatch(services: &ServiceFactory, message: &IncomingMessage) -> Result<DispatchOutcome> {
    if !message.is_group() && !message.from_me {
        return Ok(DispatchOutcome::Ignored(IgnoreReason::NotGroup));
    }

    let prefix = services.bot_config.snapshot().prefix;
    let Some(parsed) = parse_command(&message.text, &prefix) else {
        return Ok(DispatchOutcome::Ignored(IgnoreReason::NotCommand));
    };

    if message.is_group() && !message.from_me && !services.dashboard_config.is_group_active(&message.conversation_id) {
        debug!(group_id = %message.conversation_id, "Ignoring command in inactive group");
        return Ok(DispatchOutcome::Ignored(IgnoreReason::InactiveGroup));
    }

    debug!(
        command = %parsed.name,
        sender = %jid::canonical_number(&message.sender_id),
        conversation = %message.conversation_id,
        "Command received"
    );

    let builtin = BuiltinCommand::from_name(&parsed.name);
    let custom = if builtin.is_some() {
        services.dashboard_config.find_command(&parsed.name)
    } else {
        services.dashboard_config.find_command_or_reload(&parsed.name).await
    };

    let ctx = CommandContext::new(services, message, parsed, prefix);

    if let Some(command) = custom {
        return run_custom(&ctx, command).await;
    }

    let Some(builtin) = builtin else {
        debug!(command = %ctx.command.name, "Unknown command ignored");
        return Ok(DispatchOutcome::Unknown(ctx.command.name.clone()));
    };

    if builtin.requires_admin() && !ctx.is_authorized().await {
        info!(command = ?builtin, sender = %ctx.sender_number(), "Admin command refused");
        ctx.reply(texts::PERMISSION_DENIED).await?;
        return Ok(DispatchOutcome::Denied(builtin));
    }

    match builtin {
        BuiltinCommand::Help => help::handle_help(&ctx).await?,
        BuiltinCommand::Rules => help::handle_rules(&ctx).await?,
        BuiltinCommand::Donation => donation::handle_donation(&ctx).await?,
        BuiltinCommand::Kick => kick::handle_kick(&ctx).await?,
        BuiltinCommand::Debug => diagnostics::handle_debug(&ctx).await?,
        BuiltinCommand::TestMention => diagnostics::handle_test_mention(&ctx).await?,
        BuiltinCommand::TestOwner => diagnostics::handle_test_owner(&ctx).await?,
        BuiltinCommand::BotAdmin => diagnostics::handle_bot_admin(&ctx).await?,
        BuiltinCommand::Reload => reload::handle_reload(&ctx).await?,
    }

    Ok(DispatchOutcome::Builtin(builtin))
}

async fn run_custom(ctx: &CommandContext<'_>, command: CustomCommand) -> Result<DispatchOutcome> {
    if command.admin_only && !ctx.is_authorized().await {
        ctx.reply(texts::PERMISSION_DENIED).await?;
        return Ok(DispatchOutcome::CustomDenied(command.command));
    }

    let text = command.render(&jid::mention_text(&ctx.message.sender_id));
    ctx.services.dashboard_config.record_usage(&command).await;

    if command.mentions_user() {
        ctx.reply_mentioning(text, vec![ctx.message.sender_id.clone()]).await?;
    } else {
        ctx.reply(text).await?;
    }

    info!(command = %command.command, sender = %ctx.sender_number(), "Custom command answered");
    Ok(DispatchOutcome::Custom(command.command))
}
