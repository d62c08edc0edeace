//! Export timestamps — the original text plus its parsed wall-clock value.
//!
//! Timezone policy: the date is taken exactly as written in the export.
//! Naive timestamps stay naive; RFC 3339 timestamps keep the wall-clock time
//! of their own offset. Nothing is converted to UTC or to the host zone, so
//! the year a trade lands in never depends on where the converter runs.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// A timestamp as it appeared in the export.
///
/// Serializes back to the exact source text so the dashboard sees what the
/// broker wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    at: NaiveDateTime,
}

impl Timestamp {
    /// Parse an export timestamp. Returns `None` for unrecognised formats.
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text.trim();
        let at = parse_wall_clock(raw)?;
        Some(Self {
            raw: raw.to_string(),
            at,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn wall_clock(&self) -> NaiveDateTime {
        self.at
    }

    pub fn year(&self) -> i32 {
        self.at.year()
    }
}

fn parse_wall_clock(raw: &str) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_tradingview_minutes() {
        let ts = Timestamp::parse("2023-01-05 08:00").unwrap();
        assert_eq!(ts.year(), 2023);
        assert_eq!(ts.wall_clock().hour(), 8);
        assert_eq!(ts.as_str(), "2023-01-05 08:00");
    }

    #[test]
    fn parses_slash_and_date_only() {
        assert_eq!(Timestamp::parse("2022/12/31 23:59").unwrap().year(), 2022);
        assert_eq!(Timestamp::parse("2021-06-01").unwrap().year(), 2021);
    }

    #[test]
    fn rfc3339_keeps_its_own_offset_date() {
        // 2024-01-01 04:30 in UTC, but 2023 as written.
        let ts = Timestamp::parse("2023-12-31T23:30:00-05:00").unwrap();
        assert_eq!(ts.year(), 2023);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Timestamp::parse("").is_none());
        assert!(Timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn serializes_as_source_text() {
        let ts = Timestamp::parse(" 2024-03-01 10:15 ").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2024-03-01 10:15\"");
        let back: Timestamp = serde_json::from_str("\"2024-03-01 10:15\"").unwrap();
        assert_eq!(back, ts);
    }
}
