//! Time handling utilities for track timestamps.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

use crate::error::{MapError, MapResult};

/// Parse an ISO 8601 timestamp, keeping its UTC offset.
///
/// Supports:
/// - RFC 3339: "2024-07-15T14:00:00+08:00", "2024-07-15T06:00:00Z"
/// - Without seconds: "2024-07-15T14:00+08:00"
/// - Without offset (assumed UTC): "2024-07-15T14:00:00", "2024-07-15 14:00"
/// - Date only (midnight UTC): "2024-07-15"
pub fn parse_timestamp(s: &str) -> MapResult<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Ok(dt);
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(utc_offset().from_utc_datetime(&ndt));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
            return Ok(utc_offset().from_utc_datetime(&ndt));
        }
    }

    Err(MapError::InvalidTime(s.to_string()))
}

/// Parse a timestamp and normalize it to UTC.
pub fn parse_utc(s: &str) -> MapResult<DateTime<Utc>> {
    parse_timestamp(s).map(|dt| dt.with_timezone(&Utc))
}

/// Hour-resolution label, e.g. "2024-07-15T14".
///
/// Rendered in the timestamp's own offset so it reads the way the feed wrote it.
pub fn hour_label(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%Y-%m-%dT%H").to_string()
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Serde adapter for track timestamps in the flexible formats of [`parse_timestamp`].
pub mod flexible {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let dt = parse_timestamp("2024-07-15T14:00:00+08:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.with_timezone(&Utc).hour(), 6);
    }

    #[test]
    fn test_parse_naive_assumes_utc() {
        let dt = parse_utc("2024-07-15T14:00:00").unwrap();
        assert_eq!(dt.hour(), 14);

        let dt = parse_utc("2024-07-15 14:30").unwrap();
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_utc("2024-07-15").unwrap();
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_timestamp("yesterday"), Err(MapError::InvalidTime(_))));
    }

    #[test]
    fn test_hour_label_truncates() {
        let dt = parse_timestamp("2024-07-15T14:45:00+08:00").unwrap();
        assert_eq!(hour_label(&dt), "2024-07-15T14");
    }
}
