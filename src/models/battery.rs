//! Device battery telemetry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single battery reading of the device running the bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryReading {
    pub timestamp: DateTime<Utc>,
    pub level: Option<u8>,
    #[serde(default)]
    pub is_charging: bool,
    pub temperature: Option<f64>,
    pub status: Option<String>,
    pub health: Option<String>,
    pub voltage: Option<u32>,
    pub technology: Option<String>,
}

/// Aggregates over the reading history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterySummary {
    pub average_level: Option<f64>,
    pub min_level: Option<u8>,
    pub max_level: Option<u8>,
    pub max_temperature: Option<f64>,
    pub readings: usize,
}

/// Payload of `GET /api/battery/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryStats {
    pub current: Option<BatteryReading>,
    pub history: Vec<BatteryReading>,
    pub summary: BatterySummary,
}

impl BatterySummary {
    pub fn from_history<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = &'a BatteryReading>,
    {
        let mut summary = BatterySummary::default();
        let mut level_total = 0u64;
        let mut level_count = 0u64;

        for reading in history {
            summary.readings += 1;

            if let Some(level) = reading.level {
                level_total += u64::from(level);
                level_count += 1;
                summary.min_level = Some(summary.min_level.map_or(level, |m| m.min(level)));
                summary.max_level = Some(summary.max_level.map_or(level, |m| m.max(level)));
            }

            if let Some(temperature) = reading.temperature {
                summary.max_temperature = Some(
                    summary
                        .max_temperature
                        .map_or(temperature, |m| m.max(temperature)),
                );
            }
        }

        if level_count > 0 {
            let average = level_total as f64 / level_count as f64;
            summary.average_level = Some((average * 10.0).round() / 10.0);
        }

        summary
    }
}
