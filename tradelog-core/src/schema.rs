//! Result document contract — the JSON the dashboard reads.
//!
//! Field names are camelCase on the wire. Money and rate fields are already
//! rounded to 2 decimals when these structs are built; counts are exact.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::domain::CompletedTrade;

/// Win/loss and P&L statistics for one year or for all years.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_trades: usize,
    pub long_trades: usize,
    pub short_trades: usize,
    pub long_wins: usize,
    pub long_losses: usize,
    pub short_wins: usize,
    pub short_losses: usize,
    pub total_pnl: f64,
    pub long_pnl: f64,
    pub short_pnl: f64,
    /// Percent, 0 when there are no long trades.
    pub long_win_rate: f64,
    /// Percent, 0 when there are no short trades.
    pub short_win_rate: f64,
    /// Total P&L as a percent of the base capital.
    pub total_return_rate: f64,
}

/// Completed trades whose exit falls in one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBucket {
    pub year: i32,
    pub trades: Vec<CompletedTrade>,
    pub long_trades: Vec<CompletedTrade>,
    pub short_trades: Vec<CompletedTrade>,
    pub stats: Stats,
}

/// Year buckets keyed by the 4-digit year string.
pub type YearlyData = BTreeMap<String, YearBucket>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sorted year keys.
    pub years: Vec<String>,
    pub overall_stats: Stats,
    #[serde(with = "iso_millis")]
    pub generated_at: DateTime<Utc>,
}

/// The single artifact written per converted export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDocument {
    pub summary: Summary,
    pub yearly_data: YearlyData,
}

/// `2024-05-01T12:00:00.000Z`, the shape browsers produce for `toISOString`.
mod iso_millis {
    use super::*;

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
