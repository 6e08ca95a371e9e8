//! WhatsApp gateway transport
//!
//! Talks to a gateway sidecar that owns the WhatsApp session. Requests go
//! over HTTP; session events arrive as JSON frames on a WebSocket.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, warn};
use url::Url;

use super::{ChatTransport, EventStream, OutgoingMessage, TransportError, TransportEvent};
use crate::config::GatewayConfig;
use crate::models::GroupMetadata;
use crate::utils::errors::{GroupWardenError, Result};

const EVENT_BUFFER: usize = 256;

/// Gateway-backed implementation of [`ChatTransport`]
#[derive(Clone)]
pub struct GatewayTransport {
    client: Client,
    base_url: Url,
    events_url: String,
    own_id: Arc<RwLock<Option<String>>>,
}

impl GatewayTransport {
    /// Create a new gateway client
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("GroupWarden-Bot/1.0")
            .build()
            .map_err(GroupWardenError::Http)?;

        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
            events_url: config.events_url.clone(),
            own_id: Arc::new(RwLock::new(None)),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Other(format!("invalid gateway path {}: {}", path, e)))
    }
}

fn request_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() || e.is_connect() {
        TransportError::Disconnected(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

/// Turn a non-success response into a status-carrying error
async fn check(response: Response) -> std::result::Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ChatTransport for GatewayTransport {
    async fn connect(&self) -> std::result::Result<EventStream, TransportError> {
        info!(url = %self.events_url, "Connecting to gateway event stream");

        let (mut socket, _) = tokio_tungstenite::connect_async(self.events_url.as_str())
            .await
            .map_err(|e| TransportError::Disconnected(e.to_string()))?;

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        tokio::spawn(async move {
            while let Some(frame) = socket.next().await {
                let text = match frame {
                    Ok(WsMessage::Text(text)) => text,
                    Ok(WsMessage::Close(_)) => break,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!(error = %e, "Gateway event stream error");
                        break;
                    }
                };

                let event: TransportEvent = match serde_json::from_str(&text) {
                    Ok(event) => event,
                    Err(e) => {
                        warn!(error = %e, "Ignoring malformed gateway event");
                        continue;
                    }
                };

                let closing = matches!(event, TransportEvent::ConnectionClosed { .. });
                if tx.send(event).await.is_err() || closing {
                    return;
                }
            }

            debug!("Gateway event stream ended");
            let _ = tx
                .send(TransportEvent::ConnectionClosed {
                    logged_out: false,
                    reason: Some("gateway stream ended".to_string()),
                })
                .await;
        });

        Ok(rx)
    }

    fn own_id(&self) -> Option<String> {
        match self.own_id.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_own_id(&self, own_id: Option<String>) {
        match self.own_id.write() {
            Ok(mut guard) => *guard = own_id,
            Err(poisoned) => *poisoned.into_inner() = own_id,
        }
    }

    async fn send_message(
        &self,
        conversation_id: &str,
        message: OutgoingMessage,
    ) -> std::result::Result<(), TransportError> {
        let url = self.endpoint(&format!(
            "conversations/{}/messages",
            urlencoding::encode(conversation_id)
        ))?;

        let response = self
            .client
            .post(url)
            .json(&message)
            .send()
            .await
            .map_err(request_error)?;
        check(response).await?;
        Ok(())
    }

    async fn group_metadata(&self, group_id: &str) -> std::result::Result<GroupMetadata, TransportError> {
        let url = self.endpoint(&format!("groups/{}", urlencoding::encode(group_id)))?;

        let response = self.client.get(url).send().await.map_err(request_error)?;
        check(response)
            .await?
            .json::<GroupMetadata>()
            .await
            .map_err(|e| TransportError::Other(format!("invalid group metadata: {}", e)))
    }

    async fn participating_groups(&self) -> std::result::Result<Vec<GroupMetadata>, TransportError> {
        let url = self.endpoint("groups")?;

        let response = self.client.get(url).send().await.map_err(request_error)?;
        check(response)
            .await?
            .json::<Vec<GroupMetadata>>()
            .await
            .map_err(|e| TransportError::Other(format!("invalid group list: {}", e)))
    }

    async fn remove_participant(
        &self,
        group_id: &str,
        participant_id: &str,
    ) -> std::result::Result<(), TransportError> {
        let url = self.endpoint(&format!(
            "groups/{}/participants/remove",
            urlencoding::encode(group_id)
        ))?;

        let response = self
            .client
            .post(url)
            .json(&json!({ "participants": [participant_id] }))
            .send()
            .await
            .map_err(request_error)?;
        check(response).await?;
        Ok(())
    }
}
