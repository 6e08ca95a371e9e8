//! Live bot status tracking
//!
//! [`StatusTracker`] owns the process-wide [`BotStatus`]; all mutation goes
//! through its methods. [`StatusSync`] pairs it with a publisher and pushes a
//! snapshot after every processed message and connection transition.

use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};

use super::dashboard_sync::StatusPublisher;
use super::welcome::{WelcomeDecision, WelcomePolicy};
use crate::models::{BatteryReading, BotStatus, GroupSummary};
use crate::utils::logging;

/// Owner of the live bot status
#[derive(Debug, Clone, Default)]
pub struct StatusTracker {
    inner: Arc<RwLock<BotStatus>>,
    /// Welcome accepted by the gate but not yet delivered
    pending_welcome: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<F: FnOnce(&mut BotStatus)>(&self, apply: F) {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        apply(&mut guard);
        guard.last_update = Utc::now();
    }

    pub fn snapshot(&self) -> BotStatus {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Transport opened; starts the reconnect guard window
    pub fn mark_connected(&self, at: DateTime<Utc>) {
        self.update(|status| {
            status.connected = true;
            status.connection_time = Some(at);
        });
    }

    pub fn mark_disconnected(&self) {
        self.update(|status| {
            status.connected = false;
            status.connection_time = None;
        });
    }

    pub fn increment_messages(&self) -> u64 {
        let mut total = 0;
        self.update(|status| {
            status.total_messages += 1;
            total = status.total_messages;
        });
        total
    }

    pub fn set_groups(&self, groups: Vec<GroupSummary>) {
        self.update(|status| status.groups = groups);
    }

    fn pending_slot(&self) -> std::sync::MutexGuard<'_, Option<DateTime<Utc>>> {
        match self.pending_welcome.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Run the welcome gate and reserve the cooldown slot when it passes.
    ///
    /// A pending welcome counts as the last one until it is confirmed or
    /// released.
    pub fn reserve_welcome(
        &self,
        policy: &WelcomePolicy,
        own_id: Option<&str>,
        joined: &[String],
        now: DateTime<Utc>,
    ) -> WelcomeDecision {
        let mut pending = self.pending_slot();
        let mut status = self.snapshot();
        status.last_welcome = status.last_welcome.max(*pending);

        let decision = policy.evaluate(&status, own_id, joined, now);
        if decision.is_allowed() {
            *pending = Some(now);
        }
        decision
    }

    /// The reserved welcome was delivered
    pub fn confirm_welcome(&self, at: DateTime<Utc>) {
        let mut pending = self.pending_slot();
        *pending = None;
        self.update(|status| status.last_welcome = Some(at));
    }

    /// The reserved welcome failed; the limiter is free again
    pub fn release_welcome(&self) {
        *self.pending_slot() = None;
    }

    pub fn set_battery(&self, reading: BatteryReading) {
        self.update(|status| status.battery = Some(reading));
    }
}

/// Pushes status snapshots to the dashboard
#[derive(Clone)]
pub struct StatusSync {
    tracker: StatusTracker,
    publisher: Arc<dyn StatusPublisher>,
}

impl StatusSync {
    pub fn new(tracker: StatusTracker, publisher: Arc<dyn StatusPublisher>) -> Self {
        Self { tracker, publisher }
    }

    pub fn tracker(&self) -> &StatusTracker {
        &self.tracker
    }

    /// Publish the current status; failures leave the bot running without a dashboard
    pub async fn publish(&self) {
        let status = self.tracker.snapshot();
        if let Err(e) = self.publisher.publish_status(&status).await {
            logging::log_sync_failure("publish_status", &e.to_string());
        }
    }
}
