//! Session loop and reconnection tests over scripted transport sessions

mod helpers;

use helpers::*;

use groupwarden::bot::{BotRuntime, SessionEnd};
use groupwarden::models::Role;
use groupwarden::transport::{ChatTransport, ParticipantAction, ParticipantsUpdate, TransportError, TransportEvent};
use groupwarden::GroupWardenError;

fn opened() -> TransportEvent {
    TransportEvent::ConnectionOpened {
        own_id: BOT_ID.to_string(),
    }
}

fn closed(logged_out: bool) -> TransportEvent {
    TransportEvent::ConnectionClosed {
        logged_out,
        reason: Some("stream errored".to_string()),
    }
}

#[tokio::test]
async fn test_first_connection_failure_is_returned() {
    let ctx = TestContext::new().await;
    let runtime = BotRuntime::new(ctx.services.clone());

    let error = runtime.run().await.unwrap_err();
    assert!(matches!(error, GroupWardenError::Transport(TransportError::Disconnected(_))));
    assert_eq!(ctx.transport.connect_calls(), 1);
}

#[tokio::test]
async fn test_session_events_are_handled_in_order() {
    let ctx = TestContext::new().await;
    ctx.transport.set_group(group_with_bot(GROUP, Role::Admin));
    ctx.transport.push_session(vec![
        TransportEvent::Qr {
            code: "2@pairing".to_string(),
        },
        opened(),
        TransportEvent::Message(group_message(MEMBER, "!rules")),
        TransportEvent::Message(group_message(MEMBER, "good morning")),
        TransportEvent::Participants(ParticipantsUpdate {
            group_id: GROUP.to_string(),
            participants: vec![TARGET.to_string()],
            action: ParticipantAction::Add,
        }),
        closed(true),
    ]);

    let runtime = BotRuntime::new(ctx.services.clone());
    let error = runtime.run().await.unwrap_err();
    assert!(matches!(error, GroupWardenError::Transport(TransportError::LoggedOut)));

    assert_eq!(ctx.transport.sent_texts().len(), 1);

    let status = ctx.dashboard.status();
    assert!(!status.connected);
    assert!(status.connection_time.is_none());
    assert_eq!(status.total_messages, 2);
    assert_eq!(status.groups.len(), 1);
    assert_eq!(status.groups[0].id, GROUP);
}

#[tokio::test]
async fn test_own_id_follows_consumed_events() {
    let ctx = TestContext::new().await;
    ctx.transport.set_own_id(None);
    ctx.transport.set_group(group_with_bot(GROUP, Role::Admin));
    ctx.transport.push_session(vec![
        opened(),
        TransportEvent::Message(kick_message(OWNER, TARGET)),
        closed(false),
    ]);
    let mut events = ctx.transport.connect().await.unwrap();

    let runtime = BotRuntime::new(ctx.services.clone());
    runtime.run_session(&mut events).await;

    // The kick queued before the close still sees the bot in the group
    assert_eq!(ctx.transport.removed(), vec![(GROUP.to_string(), TARGET.to_string())]);
    assert_eq!(ctx.transport.own_id(), None);
}

#[tokio::test]
async fn test_join_right_after_connect_gets_no_welcome() {
    let ctx = TestContext::new().await;
    let runtime = BotRuntime::new(ctx.services.clone());

    ctx.transport.push_session(vec![
        opened(),
        TransportEvent::Participants(ParticipantsUpdate {
            group_id: GROUP.to_string(),
            participants: vec![TARGET.to_string()],
            action: ParticipantAction::Add,
        }),
        closed(false),
    ]);
    let mut events = ctx.transport.connect().await.unwrap();

    let end = runtime.run_session(&mut events).await;
    assert_eq!(end, SessionEnd::Closed(Some("stream errored".to_string())));
    assert_eq!(ctx.services.scheduler.pending(), 0);
    assert!(ctx.transport.sent().is_empty());
}

#[tokio::test]
async fn test_closed_session_is_reconnected() {
    let ctx = TestContext::new().await;
    ctx.transport.push_session(vec![opened(), closed(false)]);
    ctx.transport.push_session(vec![
        opened(),
        TransportEvent::Message(group_message(MEMBER, "hi")),
        closed(true),
    ]);
    tokio::time::pause();

    let runtime = BotRuntime::new(ctx.services.clone());
    let error = runtime.run().await.unwrap_err();
    assert!(matches!(error, GroupWardenError::Transport(TransportError::LoggedOut)));
    assert_eq!(ctx.transport.connect_calls(), 2);

    // Counters survive the reconnect
    assert_eq!(ctx.dashboard.status().total_messages, 1);
}

#[tokio::test]
async fn test_stream_end_without_close_event() {
    let ctx = TestContext::new().await;
    ctx.transport.push_session(vec![opened()]);

    let mut events = ctx.transport.connect().await.unwrap();
    let runtime = BotRuntime::new(ctx.services.clone());

    let end = runtime.run_session(&mut events).await;
    assert!(matches!(end, SessionEnd::Closed(Some(_))));
    assert!(!ctx.services.status.tracker().snapshot().connected);
}
