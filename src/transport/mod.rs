//! Chat transport seam
//!
//! The WhatsApp protocol itself (pairing, encryption, credential storage) is
//! handled by an external library. The bot only needs a handful of
//! operations from it, captured by [`ChatTransport`], and a stream of
//! [`TransportEvent`]s.

pub mod gateway;
pub mod jid;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::GroupMetadata;

pub use gateway::GatewayTransport;

/// Errors reported by the chat transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request rejected with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("session was logged out")]
    LoggedOut,

    #[error("connection closed: {0}")]
    Disconnected(String),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// HTTP-like status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Receiving half of a transport session
pub type EventStream = mpsc::Receiver<TransportEvent>;

/// Operations the bot consumes from the chat transport
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Start a session and return its event stream.
    ///
    /// The stream ends after a `ConnectionClosed` event or when the
    /// underlying connection drops.
    async fn connect(&self) -> Result<EventStream, TransportError>;

    /// Identifier of the connected account, once the session is open
    fn own_id(&self) -> Option<String>;

    /// Record the connected account as session events are consumed
    fn set_own_id(&self, own_id: Option<String>);

    async fn send_message(&self, conversation_id: &str, message: OutgoingMessage) -> Result<(), TransportError>;

    async fn group_metadata(&self, group_id: &str) -> Result<GroupMetadata, TransportError>;

    async fn participating_groups(&self) -> Result<Vec<GroupMetadata>, TransportError>;

    async fn remove_participant(&self, group_id: &str, participant_id: &str) -> Result<(), TransportError>;
}

/// Text message to send
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_id: Option<String>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn quoting(mut self, message_id: impl Into<String>) -> Self {
        self.quoted_id = Some(message_id.into());
        self
    }

    pub fn mentioning(mut self, ids: Vec<String>) -> Self {
        self.mentions = ids;
        self
    }
}

/// Inbound message with the metadata the dispatcher needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingMessage {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    #[serde(default)]
    pub from_me: bool,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub mentioned_ids: Vec<String>,
    #[serde(default)]
    pub quoted_author: Option<String>,
}

impl IncomingMessage {
    pub fn is_group(&self) -> bool {
        jid::is_group(&self.conversation_id)
    }

    /// Target of a moderation command.
    ///
    /// The first explicit mention wins; a reply falls back to the quoted
    /// message's author.
    pub fn mention_target(&self) -> Option<&str> {
        self.mentioned_ids
            .first()
            .map(String::as_str)
            .or(self.quoted_author.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Kind of membership change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantAction {
    Add,
    Remove,
    Promote,
    Demote,
}

/// Membership change in a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantsUpdate {
    pub group_id: String,
    pub participants: Vec<String>,
    pub action: ParticipantAction,
}

/// Events emitted by a transport session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportEvent {
    /// Pairing code to be rendered for the operator
    Qr { code: String },
    #[serde(rename_all = "camelCase")]
    ConnectionOpened { own_id: String },
    #[serde(rename_all = "camelCase")]
    ConnectionClosed {
        #[serde(default)]
        logged_out: bool,
        #[serde(default)]
        reason: Option<String>,
    },
    Participants(ParticipantsUpdate),
    Message(IncomingMessage),
}
