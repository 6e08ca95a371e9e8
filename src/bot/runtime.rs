//! Bot runtime: transport session loop and reconnection policy
//!
//! Events are handled one at a time in arrival order. A closed session is
//! reconnected with a growing delay unless the close reports a logout, in
//! which case the runtime stops and the session must be paired again.

use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::handlers::{handle_message, handle_participants_update};
use crate::services::ServiceFactory;
use crate::transport::{EventStream, TransportError, TransportEvent};
use crate::utils::errors::{GroupWardenError, Result};
use crate::utils::logging;

const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(60);

/// How a transport session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Closed(Option<String>),
    LoggedOut,
}

pub struct BotRuntime {
    services: ServiceFactory,
}

impl BotRuntime {
    pub fn new(services: ServiceFactory) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &ServiceFactory {
        &self.services
    }

    /// Run until the session is logged out.
    ///
    /// A failure of the very first connection attempt is returned to the
    /// caller; later failures are retried.
    pub async fn run(&self) -> Result<()> {
        let mut events = self.services.transport.connect().await?;
        let base_delay = self.services.settings.bot.reconnect_delay();

        loop {
            match self.run_session(&mut events).await {
                SessionEnd::LoggedOut => {
                    error!("Session logged out; pair the device again to reconnect");
                    return Err(GroupWardenError::Transport(TransportError::LoggedOut));
                }
                SessionEnd::Closed(reason) => {
                    warn!(reason = ?reason, "Connection closed, reconnecting");
                }
            }

            events = self.reconnect(base_delay).await;
        }
    }

    async fn reconnect(&self, base_delay: Duration) -> EventStream {
        let mut delay = base_delay;
        loop {
            info!(delay = ?delay, "Sleeping before next connection attempt");
            tokio::time::sleep(delay).await;

            match self.services.transport.connect().await {
                Ok(events) => return events,
                Err(e) => {
                    logging::log_transport_error("connect", &e.to_string(), None);
                    delay = (delay * 2).min(MAX_RECONNECT_DELAY);
                }
            }
        }
    }

    /// Handle events until the session closes
    pub async fn run_session(&self, events: &mut EventStream) -> SessionEnd {
        while let Some(event) = events.recv().await {
            match event {
                TransportEvent::Qr { code } => {
                    info!(qr = %code, "Pairing code received; scan it with the phone app");
                }
                TransportEvent::ConnectionOpened { own_id } => {
                    self.on_open(&own_id).await;
                }
                TransportEvent::ConnectionClosed { logged_out, reason } => {
                    self.on_close().await;
                    return if logged_out {
                        SessionEnd::LoggedOut
                    } else {
                        SessionEnd::Closed(reason)
                    };
                }
                TransportEvent::Participants(update) => {
                    handle_participants_update(&self.services, &update);
                }
                TransportEvent::Message(message) => {
                    handle_message(&self.services, &message).await;
                }
            }
        }

        self.on_close().await;
        SessionEnd::Closed(Some("event stream ended".to_string()))
    }

    async fn on_open(&self, own_id: &str) {
        info!(own_id = own_id, "Connected to WhatsApp");
        self.services.transport.set_own_id(Some(own_id.to_string()));
        let tracker = self.services.status.tracker();
        tracker.mark_connected(Utc::now());

        match self.services.transport.participating_groups().await {
            Ok(groups) => {
                info!(groups = groups.len(), "Participating groups loaded");
                tracker.set_groups(groups.iter().map(|g| g.summary()).collect());
            }
            Err(e) => logging::log_transport_error("participating_groups", &e.to_string(), None),
        }

        // A failed reload keeps the cached configuration and is already logged
        let _ = self.services.dashboard_config.reload().await;
        self.services.status.publish().await;
    }

    async fn on_close(&self) {
        self.services.transport.set_own_id(None);
        let tracker = self.services.status.tracker();
        if tracker.snapshot().connected {
            tracker.mark_disconnected();
            self.services.status.publish().await;
        }
    }
}
