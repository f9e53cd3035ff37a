//! Resolve the satellite frame to show for an instant.
//!
//! The provider names frames after their capture slot and publishes them
//! with a delay, so the newest retrievable frame for `t` is the slot that
//! started one publication delay earlier:
//!
//! ```text
//!   t (local)           14:07
//!   floor to cadence    14:00
//!   selected = - delay  13:00
//!   start = - cadence   12:50
//! ```

use chrono::{DateTime, Duration, FixedOffset, Timelike, Utc};
use projection::project_rect;
use tracing::debug;
use typhoon_common::{template, GeoBounds, PixelRect, SatelliteConfig};

use crate::error::SatelliteResult;

/// A resolved satellite frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteSlot {
    /// Capture slot of the frame, in the provider's local offset
    pub selected: DateTime<FixedOffset>,
    /// Start of the capture window ending at `selected`
    pub start: DateTime<FixedOffset>,
    pub image_key: String,
    pub url: String,
    /// Where the frame is stretched on the canvas
    pub rect: PixelRect,
}

/// Resolve the slot for `query`, or for `now` when no query is given.
pub fn resolve_slot(
    query: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    config: &SatelliteConfig,
    bounds: &GeoBounds,
) -> SatelliteResult<SatelliteSlot> {
    let t = query.unwrap_or(now);
    let (selected, start) = quantize(t, config)?;

    let image_key = image_key(&config.key_template, &selected, &start)?;
    let url = template::fill(&config.url_template, |name| {
        (name == "key").then(|| image_key.clone())
    })?;
    let rect = project_rect(&config.footprint, bounds);

    debug!(
        query = %t,
        selected = %selected,
        key = %image_key,
        "Resolved satellite slot"
    );

    Ok(SatelliteSlot {
        selected,
        start,
        image_key,
        url,
        rect,
    })
}

/// Quantize an instant to `(selected, start)` in the provider's offset.
pub fn quantize(
    t: DateTime<Utc>,
    config: &SatelliteConfig,
) -> SatelliteResult<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let offset = config.local_offset()?;
    let local = t.with_timezone(&offset);
    let cadence = config.cadence_minutes.max(1);

    let floored = local
        - Duration::minutes(i64::from(local.minute() % cadence))
        - Duration::seconds(i64::from(local.second()))
        - Duration::nanoseconds(i64::from(local.nanosecond()));

    let selected = floored - Duration::minutes(i64::from(config.publication_delay_minutes));
    let start = selected - Duration::minutes(i64::from(cadence));
    Ok((selected, start))
}

/// Fill the key template from the two slot instants.
///
/// Local fields come from `selected` in its own offset, `utc_*` fields from
/// the same instant in UTC, and `start_utc_*` from `start` in UTC.
pub fn image_key(
    key_template: &str,
    selected: &DateTime<FixedOffset>,
    start: &DateTime<FixedOffset>,
) -> SatelliteResult<String> {
    let selected_utc = selected.with_timezone(&Utc);
    let start_utc = start.with_timezone(&Utc);

    let key = template::fill(key_template, |name| {
        let value = match name {
            "year" => selected.format("%Y"),
            "month" => selected.format("%m"),
            "day" => selected.format("%d"),
            "hour" => selected.format("%H"),
            "minute" => selected.format("%M"),
            "utc_year" => selected_utc.format("%Y"),
            "utc_month" => selected_utc.format("%m"),
            "utc_day" => selected_utc.format("%d"),
            "utc_hour" => selected_utc.format("%H"),
            "start_utc_day" => start_utc.format("%d"),
            "start_utc_hour" => start_utc.format("%H"),
            "start_utc_minute" => start_utc.format("%M"),
            _ => return None,
        };
        Some(value.to_string())
    })?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::utc;

    #[test]
    fn test_quantize_drops_seconds() {
        let config = SatelliteConfig::default();
        let t = utc(2024, 7, 15, 6, 9) + Duration::seconds(59) + Duration::milliseconds(500);
        let (selected, start) = quantize(t, &config).unwrap();
        assert_eq!(selected.second(), 0);
        assert_eq!(selected.nanosecond(), 0);
        assert_eq!(selected.minute(), 0);
        assert_eq!(start.minute(), 50);
    }

    #[test]
    fn test_image_key_default_template() {
        let config = SatelliteConfig::default();
        // 14:07 HKT
        let (selected, start) = quantize(utc(2024, 7, 15, 6, 7), &config).unwrap();
        let key = image_key(&config.key_template, &selected, &start).unwrap();
        assert_eq!(key, "20240715/ir_202407150500_150450");
    }
}
