//! Command dispatch tests

mod helpers;

use helpers::*;

use groupwarden::handlers::{dispatch, handle_message, BuiltinCommand, DispatchOutcome, IgnoreReason};
use groupwarden::models::{DonationPatch, NewCommand, Role};
use groupwarden::transport::IncomingMessage;

fn new_command(name: &str, response: &str, admin_only: bool) -> NewCommand {
    NewCommand {
        command: name.to_string(),
        response: response.to_string(),
        admin_only,
        description: String::new(),
    }
}

#[tokio::test]
async fn test_private_messages_are_ignored() {
    let ctx = TestContext::new().await;
    let message = IncomingMessage {
        conversation_id: MEMBER.to_string(),
        ..group_message(MEMBER, "!help")
    };

    let outcome = dispatch(&ctx.services, &message).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::NotGroup));
    assert!(ctx.transport.sent().is_empty());
}

#[tokio::test]
async fn test_self_sent_private_command_is_evaluated() {
    let ctx = TestContext::new().await;
    let message = IncomingMessage {
        conversation_id: OWNER.to_string(),
        sender_id: BOT_ID.to_string(),
        from_me: true,
        ..group_message(BOT_ID, "!rules")
    };

    let outcome = dispatch(&ctx.services, &message).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Builtin(BuiltinCommand::Rules));
}

#[tokio::test]
async fn test_plain_text_is_not_a_command() {
    let ctx = TestContext::new().await;
    let outcome = dispatch(&ctx.services, &group_message(MEMBER, "hello everyone")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::NotCommand));
}

#[tokio::test]
async fn test_leading_whitespace_is_not_a_command() {
    let ctx = TestContext::new().await;
    let message = IncomingMessage {
        text: "  !kick".to_string(),
        ..kick_message(OWNER, TARGET)
    };
    let outcome = dispatch(&ctx.services, &message).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::NotCommand));
    assert!(ctx.transport.removed().is_empty());
}

#[tokio::test]
async fn test_donation_aliases_while_disabled() {
    let ctx = TestContext::new().await;

    for text in ["!pix", "!donate", "!doar"] {
        let outcome = dispatch(&ctx.services, &group_message(MEMBER, text)).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Builtin(BuiltinCommand::Donation));
    }
    assert!(ctx
        .transport
        .sent_texts()
        .iter()
        .all(|text| text.contains("not open")));
}

#[tokio::test]
async fn test_donation_details_and_footers() {
    let ctx = TestContext::new().await;
    ctx.dashboard
        .web_config
        .update_donation(DonationPatch {
            pix_key: Some("key-123".to_string()),
            enabled: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    ctx.sync_config().await;

    dispatch(&ctx.services, &group_message(MEMBER, "!doar")).await.unwrap();
    let reply = ctx.transport.last_text().unwrap();
    assert!(reply.contains("`key-123`"));

    dispatch(&ctx.services, &group_message(MEMBER, "!help")).await.unwrap();
    assert!(ctx.transport.last_text().unwrap().contains("Use `!pix` to support"));

    dispatch(&ctx.services, &group_message(MEMBER, "!regras")).await.unwrap();
    let rules = ctx.transport.last_text().unwrap();
    assert!(rules.contains("Group Rules"));
    assert!(rules.contains("Use `!pix` to support"));
}

#[tokio::test]
async fn test_inactive_group_is_ignored() {
    let ctx = TestContext::new().await;
    ctx.dashboard.web_config.set_group_active(GROUP, false).await.unwrap();
    ctx.sync_config().await;

    let outcome = dispatch(&ctx.services, &group_message(OWNER, "!help")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::InactiveGroup));
    assert!(ctx.transport.sent().is_empty());
}

#[tokio::test]
async fn test_unknown_command_is_silent() {
    let ctx = TestContext::new().await;
    let outcome = dispatch(&ctx.services, &group_message(MEMBER, "!whatever")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Unknown("whatever".to_string()));
    assert!(ctx.transport.sent().is_empty());
}

#[tokio::test]
async fn test_open_builtin_answers_members() {
    let ctx = TestContext::new().await;
    ctx.transport.set_group(group_with_bot(GROUP, Role::Admin));

    let outcome = dispatch(&ctx.services, &group_message(MEMBER, "!regras")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Builtin(BuiltinCommand::Rules));

    let (conversation, reply) = ctx.transport.sent().pop().unwrap();
    assert_eq!(conversation, GROUP);
    assert!(reply.text.contains("Group Rules"));
    assert_eq!(reply.quoted_id.as_deref(), Some("MSG1"));
}

#[tokio::test]
async fn test_admin_builtin_denied_for_members() {
    let ctx = TestContext::new().await;
    ctx.transport.set_group(group_with_bot(GROUP, Role::Admin));

    let outcome = dispatch(&ctx.services, &group_message(MEMBER, "!debug")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Denied(BuiltinCommand::Debug));
    assert!(ctx.transport.last_text().unwrap().contains("not allowed"));
}

#[tokio::test]
async fn test_help_hides_admin_commands_from_members() {
    let ctx = TestContext::new().await;
    ctx.transport.set_group(group_with_bot(GROUP, Role::Admin));

    dispatch(&ctx.services, &group_message(MEMBER, "!help")).await.unwrap();
    let member_help = ctx.transport.last_text().unwrap();
    assert!(!member_help.contains("!debug"));

    dispatch(&ctx.services, &group_message(GROUP_ADMIN, "!ajuda")).await.unwrap();
    let admin_help = ctx.transport.last_text().unwrap();
    assert!(admin_help.contains("!debug"));
}

#[tokio::test]
async fn test_custom_command_name_is_canonical() {
    let ctx = TestContext::new().await;
    let created = ctx
        .dashboard
        .web_config
        .add_command(new_command("Foo!", "Hello {user}!", false))
        .await
        .unwrap();
    assert_eq!(created.command, "foo");
    ctx.sync_config().await;

    for text in ["!foo", "!Foo"] {
        let outcome = dispatch(&ctx.services, &group_message(MEMBER, text)).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Custom("foo".to_string()));
    }

    let (_, reply) = ctx.transport.sent().pop().unwrap();
    assert_eq!(reply.text, "Hello @5511666666666!");
    assert_eq!(reply.mentions, vec![MEMBER.to_string()]);
}

#[tokio::test]
async fn test_custom_command_shadows_builtin() {
    let ctx = TestContext::new().await;
    ctx.dashboard
        .web_config
        .add_command(new_command("rules", "Read the pinned message", false))
        .await
        .unwrap();
    ctx.sync_config().await;

    let outcome = dispatch(&ctx.services, &group_message(MEMBER, "!rules")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Custom("rules".to_string()));
    assert_eq!(ctx.transport.last_text().unwrap(), "Read the pinned message");
}

#[tokio::test]
async fn test_admin_only_custom_command() {
    let ctx = TestContext::new().await;
    ctx.transport.set_group(group_with_bot(GROUP, Role::Admin));
    ctx.dashboard
        .web_config
        .add_command(new_command("secret", "Staff only", true))
        .await
        .unwrap();
    ctx.sync_config().await;

    let denied = dispatch(&ctx.services, &group_message(MEMBER, "!secret")).await.unwrap();
    assert_eq!(denied, DispatchOutcome::CustomDenied("secret".to_string()));

    let allowed = dispatch(&ctx.services, &group_message(GROUP_ADMIN, "!secret")).await.unwrap();
    assert_eq!(allowed, DispatchOutcome::Custom("secret".to_string()));
    assert_eq!(ctx.transport.last_text().unwrap(), "Staff only");
}

#[tokio::test]
async fn test_new_command_found_after_reload() {
    let ctx = TestContext::new().await;
    // Added through the dashboard after the bot cached its config
    ctx.dashboard
        .web_config
        .add_command(new_command("promo", "Promo code: 123", false))
        .await
        .unwrap();

    let outcome = dispatch(&ctx.services, &group_message(MEMBER, "!promo")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Custom("promo".to_string()));
}

#[tokio::test]
async fn test_usage_counted_after_dispatch() {
    let ctx = TestContext::new().await;
    let created = ctx
        .dashboard
        .web_config
        .add_command(new_command("pix", "Key: 123", false))
        .await
        .unwrap();
    assert_eq!(created.usage, 0);
    ctx.sync_config().await;

    dispatch(&ctx.services, &group_message(MEMBER, "!pix")).await.unwrap();

    let stored = ctx.dashboard.web_config.load().await.unwrap();
    assert_eq!(stored.find_command("pix").unwrap().usage, 1);
}

#[tokio::test]
async fn test_message_handler_counts_and_publishes() {
    let ctx = TestContext::new().await;

    handle_message(&ctx.services, &group_message(MEMBER, "hi")).await;
    handle_message(&ctx.services, &group_message(MEMBER, "!rules")).await;

    assert_eq!(ctx.services.status.tracker().snapshot().total_messages, 2);
    assert_eq!(ctx.dashboard.status().total_messages, 2);
}
