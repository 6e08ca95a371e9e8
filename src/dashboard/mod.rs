//! Web dashboard
//!
//! REST API over the web configuration store and the mirrored bot status,
//! a WebSocket push server on its own port, and the static front-end.
//! When the dashboard runs inside the bot process, [`DashboardState`] is
//! handed to the bot directly as its status publisher and config source.

pub mod error;
pub mod response;
pub mod routes;
pub mod websocket;

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::http::Method;
use axum::Router;
use chrono::Utc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::models::{BatteryReading, BatteryStats, BatterySummary, BotStatus, DashboardEvent, StatusUpdate, WebConfig};
use crate::services::{ConfigSource, StatusPublisher, WebConfigStore};
use crate::utils::errors::{GroupWardenError, Result};

pub use error::ApiError;
pub use response::{ApiResponse, GroupsOverview};

/// Shared state behind the dashboard routes
#[derive(Clone)]
pub struct DashboardState {
    pub web_config: WebConfigStore,
    status: Arc<RwLock<BotStatus>>,
    battery_history: Arc<RwLock<VecDeque<BatteryReading>>>,
    history_size: usize,
    events: broadcast::Sender<DashboardEvent>,
}

impl DashboardState {
    pub fn new(config: &DashboardConfig, history_size: usize) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer.max(1));
        let web_config = WebConfigStore::new(&config.web_config_file, events.clone());

        Self {
            web_config,
            status: Arc::new(RwLock::new(BotStatus::default())),
            battery_history: Arc::new(RwLock::new(VecDeque::with_capacity(history_size))),
            history_size: history_size.max(1),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    fn broadcast(&self, event: DashboardEvent) {
        let kind = event.kind();
        if self.events.send(event).is_err() {
            debug!(event = kind, "No dashboard clients connected");
        }
    }

    pub fn status(&self) -> BotStatus {
        match self.status.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Merge a status update, record any new battery reading and notify clients
    pub fn update_status(&self, update: StatusUpdate) -> BotStatus {
        let reading = update.battery.clone();

        let status = {
            let mut guard = match self.status.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.apply(update, Utc::now());
            guard.clone()
        };

        if let Some(reading) = reading {
            self.record_battery(reading);
        }

        self.broadcast(DashboardEvent::BotStatus(status.clone()));
        status
    }

    /// Append a reading unless it is the one already recorded last
    pub fn record_battery(&self, reading: BatteryReading) {
        {
            let mut history = match self.battery_history.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if history.back().is_some_and(|last| last.timestamp == reading.timestamp) {
                return;
            }
            if history.len() >= self.history_size {
                history.pop_front();
            }
            history.push_back(reading.clone());
        }

        self.broadcast(DashboardEvent::BatteryStatus(reading));
    }

    pub fn battery_stats(&self) -> BatteryStats {
        let history: Vec<BatteryReading> = match self.battery_history.read() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        };

        BatteryStats {
            current: history.last().cloned(),
            summary: BatterySummary::from_history(&history),
            history,
        }
    }
}

#[async_trait]
impl StatusPublisher for DashboardState {
    async fn publish_status(&self, status: &BotStatus) -> Result<()> {
        self.update_status(StatusUpdate::from(status.clone()));
        Ok(())
    }
}

#[async_trait]
impl ConfigSource for DashboardState {
    async fn fetch_config(&self) -> Result<WebConfig> {
        self.web_config.load().await
    }

    async fn record_usage(&self, command_id: &str) -> Result<()> {
        self.web_config.record_usage(command_id).await.map(|_| ())
    }
}

/// REST router with CORS and the static front-end as fallback
pub fn create_router(state: DashboardState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    routes::api_router()
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
}

/// Serve the REST API and the WebSocket push server until either fails
pub async fn serve(state: DashboardState, config: &DashboardConfig) -> Result<()> {
    let http_addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
        .parse()
        .map_err(|e| GroupWardenError::Config(format!("Invalid dashboard address: {e}")))?;
    let ws_addr: SocketAddr = format!("{}:{}", config.host, config.ws_port)
        .parse()
        .map_err(|e| GroupWardenError::Config(format!("Invalid WebSocket address: {e}")))?;

    let http_listener = TcpListener::bind(http_addr).await?;
    let ws_listener = TcpListener::bind(ws_addr).await?;

    info!(address = %http_addr, "Dashboard listening");
    info!(address = %ws_addr, "Dashboard WebSocket listening");

    let api = create_router(state.clone(), &config.static_dir);
    let ws = websocket::create_ws_router(state);

    tokio::try_join!(
        async { axum::serve(http_listener, api).await },
        async { axum::serve(ws_listener, ws).await },
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reading(seconds_ago: i64, level: u8) -> BatteryReading {
        BatteryReading {
            timestamp: Utc::now() - Duration::seconds(seconds_ago),
            level: Some(level),
            is_charging: false,
            temperature: None,
            status: None,
            health: None,
            voltage: None,
            technology: None,
        }
    }

    fn state(history_size: usize) -> DashboardState {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            web_config_file: dir.path().join("web-config.json").to_string_lossy().into_owned(),
            ..Default::default()
        };
        DashboardState::new(&config, history_size)
    }

    #[test]
    fn test_battery_history_is_bounded() {
        let state = state(2);
        state.record_battery(reading(30, 90));
        state.record_battery(reading(20, 80));
        state.record_battery(reading(10, 70));

        let stats = state.battery_stats();
        assert_eq!(stats.history.len(), 2);
        assert_eq!(stats.current.and_then(|r| r.level), Some(70));
        assert_eq!(stats.summary.max_level, Some(80));
    }

    #[test]
    fn test_repeated_reading_recorded_once() {
        let state = state(10);
        let same = reading(5, 50);
        state.record_battery(same.clone());
        state.record_battery(same);
        assert_eq!(state.battery_stats().history.len(), 1);
    }

    #[tokio::test]
    async fn test_status_update_is_broadcast() {
        let state = state(10);
        let mut rx = state.subscribe();

        state.update_status(StatusUpdate {
            connected: Some(true),
            total_messages: Some(3),
            ..Default::default()
        });

        let event = rx.recv().await.unwrap();
        assert_matches::assert_matches!(event, DashboardEvent::BotStatus(status) if status.total_messages == 3);
        assert!(state.status().connected);
    }
}
