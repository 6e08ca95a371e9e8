//! Welcome gate
//!
//! Pure decision over the bot status and a membership-change payload:
//! should the automatic rules message be sent for this join?

use chrono::{DateTime, Duration, Utc};

use crate::config::BotSettings;
use crate::models::BotStatus;
use crate::transport::jid;

/// Thresholds applied by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WelcomePolicy {
    /// Minimum time since the transport opened
    pub startup_grace: Duration,
    /// Minimum time since the last sent welcome, across all groups
    pub cooldown: Duration,
    /// Largest join batch that still gets a welcome
    pub max_batch: usize,
}

impl Default for WelcomePolicy {
    fn default() -> Self {
        Self {
            startup_grace: Duration::minutes(2),
            cooldown: Duration::seconds(10),
            max_batch: 5,
        }
    }
}

impl From<&BotSettings> for WelcomePolicy {
    fn from(settings: &BotSettings) -> Self {
        Self {
            startup_grace: Duration::seconds(settings.startup_grace_seconds as i64),
            cooldown: Duration::seconds(settings.welcome_cooldown_seconds as i64),
            max_batch: settings.max_welcome_batch,
        }
    }
}

/// Outcome of the gate, with the reason for a refusal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeDecision {
    Allowed,
    NotConnected,
    StartupGrace,
    EmptyBatch,
    IncludesBot,
    BulkAdd,
    CoolingDown,
}

impl WelcomeDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, WelcomeDecision::Allowed)
    }
}

impl WelcomePolicy {
    /// Evaluate every rule; all must hold for a welcome
    pub fn evaluate(
        &self,
        status: &BotStatus,
        own_id: Option<&str>,
        joined: &[String],
        now: DateTime<Utc>,
    ) -> WelcomeDecision {
        let Some(connected_at) = status.connection_time else {
            return WelcomeDecision::NotConnected;
        };
        if now - connected_at < self.startup_grace {
            return WelcomeDecision::StartupGrace;
        }

        if joined.is_empty() {
            return WelcomeDecision::EmptyBatch;
        }

        if let Some(own_number) = own_id.map(jid::canonical_number).filter(|n| !n.is_empty()) {
            if joined.iter().any(|id| jid::matches_number(id, &own_number)) {
                return WelcomeDecision::IncludesBot;
            }
        }

        if joined.len() > self.max_batch {
            return WelcomeDecision::BulkAdd;
        }

        if let Some(last) = status.last_welcome {
            if now - last < self.cooldown {
                return WelcomeDecision::CoolingDown;
            }
        }

        WelcomeDecision::Allowed
    }

    /// Convenience wrapper returning only the verdict
    pub fn should_welcome(
        &self,
        status: &BotStatus,
        own_id: Option<&str>,
        joined: &[String],
        now: DateTime<Utc>,
    ) -> bool {
        self.evaluate(status, own_id, joined, now).is_allowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOT: &str = "5511000000000@s.whatsapp.net";

    fn connected_since(seconds: i64, now: DateTime<Utc>) -> BotStatus {
        BotStatus {
            connected: true,
            connection_time: Some(now - Duration::seconds(seconds)),
            ..Default::default()
        }
    }

    fn members(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("55119000000{:02}@s.whatsapp.net", i)).collect()
    }

    #[test]
    fn test_allowed_after_grace() {
        let now = Utc::now();
        let status = connected_since(121, now);
        assert_eq!(
            WelcomePolicy::default().evaluate(&status, Some(BOT), &members(1), now),
            WelcomeDecision::Allowed
        );
    }

    #[test]
    fn test_refusal_reasons() {
        let policy = WelcomePolicy::default();
        let now = Utc::now();

        let disconnected = BotStatus::default();
        assert_eq!(policy.evaluate(&disconnected, Some(BOT), &members(1), now), WelcomeDecision::NotConnected);

        let fresh = connected_since(30, now);
        assert_eq!(policy.evaluate(&fresh, Some(BOT), &members(1), now), WelcomeDecision::StartupGrace);

        let settled = connected_since(600, now);
        assert_eq!(policy.evaluate(&settled, Some(BOT), &[], now), WelcomeDecision::EmptyBatch);
        assert_eq!(
            policy.evaluate(&settled, Some(BOT), &["5511000000000:2@s.whatsapp.net".to_string()], now),
            WelcomeDecision::IncludesBot
        );
        assert_eq!(policy.evaluate(&settled, Some(BOT), &members(6), now), WelcomeDecision::BulkAdd);
        assert_eq!(policy.evaluate(&settled, Some(BOT), &members(5), now), WelcomeDecision::Allowed);

        let recent = BotStatus {
            last_welcome: Some(now - Duration::seconds(9)),
            ..settled.clone()
        };
        assert_eq!(policy.evaluate(&recent, Some(BOT), &members(1), now), WelcomeDecision::CoolingDown);

        let cooled = BotStatus {
            last_welcome: Some(now - Duration::seconds(10)),
            ..settled
        };
        assert!(policy.should_welcome(&cooled, Some(BOT), &members(1), now));
    }

    proptest! {
        #[test]
        fn prop_never_within_startup_grace(elapsed in 0i64..120, count in 0usize..10) {
            let now = Utc::now();
            let status = connected_since(elapsed, now);
            prop_assert!(!WelcomePolicy::default().should_welcome(&status, Some(BOT), &members(count), now));
        }

        #[test]
        fn prop_never_for_bulk_adds(count in 6usize..50) {
            let now = Utc::now();
            let status = connected_since(3600, now);
            prop_assert!(!WelcomePolicy::default().should_welcome(&status, Some(BOT), &members(count), now));
        }

        #[test]
        fn prop_never_within_cooldown(since_last in 0i64..10) {
            let now = Utc::now();
            let status = BotStatus {
                last_welcome: Some(now - Duration::seconds(since_last)),
                ..connected_since(3600, now)
            };
            prop_assert!(!WelcomePolicy::default().should_welcome(&status, Some(BOT), &members(1), now));
        }

        #[test]
        fn prop_never_when_bot_joins(others in 0usize..4) {
            let now = Utc::now();
            let status = connected_since(3600, now);
            let mut joined = members(others);
            joined.push(BOT.to_string());
            prop_assert!(!WelcomePolicy::default().should_welcome(&status, Some(BOT), &joined, now));
        }
    }
}
