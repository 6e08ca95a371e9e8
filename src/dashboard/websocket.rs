//! Realtime push channel for dashboard clients
//!
//! Served on its own port. Every client first receives the current
//! `bot_status`, then every broadcast event as `{"type": ..., "data": ...}`.

use axum::{
    extract::{
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::StreamExt;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use super::DashboardState;
use crate::models::DashboardEvent;

pub fn create_ws_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(websocket_handler))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<DashboardState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

fn encode(event: &DashboardEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(Utf8Bytes::from(json))),
        Err(e) => {
            warn!(event = event.kind(), error = %e, "Failed to serialize dashboard event");
            None
        }
    }
}

async fn handle_socket(mut socket: WebSocket, state: DashboardState) {
    info!("Dashboard client connected");

    // Subscribe before the snapshot so no update falls in between
    let mut rx = state.subscribe();

    if let Some(initial) = encode(&DashboardEvent::BotStatus(state.status())) {
        if socket.send(initial).await.is_err() {
            debug!("Client went away before the initial status");
            return;
        }
    }

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let Some(message) = encode(&event) else { continue };
                    if socket.send(message).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped = skipped, "Dashboard client lagging, events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.next() => match incoming {
                Some(Ok(Message::Text(text))) if text.as_str() == "ping" => {
                    if socket.send(Message::Text(Utf8Bytes::from_static("pong"))).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }

    info!("Dashboard client disconnected");
}
