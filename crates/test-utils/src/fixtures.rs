//! Common test fixtures for typhoon-track tests.
//!
//! Times are written with the Hong Kong offset (+08:00) the cyclone feed uses.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use typhoon_common::{
    time::parse_timestamp, Classification, Coastline, Cyclone, GeoBounds, GeoRect, Point,
    PointKind,
};

/// Parse a fixture timestamp; panics on malformed input.
pub fn ts(s: &str) -> DateTime<FixedOffset> {
    parse_timestamp(s).unwrap_or_else(|e| panic!("bad fixture time {}: {}", s, e))
}

/// UTC instant from calendar fields.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(|| panic!("bad fixture date {}-{}-{} {}:{}", year, month, day, hour, minute))
}

/// Build a track point.
pub fn point(
    kind: PointKind,
    time: &str,
    latitude: f64,
    longitude: f64,
    classification: Option<&str>,
    windspeed: Option<f64>,
) -> Point {
    Point {
        kind,
        time: ts(time),
        latitude,
        longitude,
        classification: classification.map(Classification::from_code),
        windspeed,
    }
}

/// Common bounds definitions for testing.
pub mod bounds {
    use super::*;

    /// 4x4 degree window around 22N 114E on a 1000x1000 canvas.
    pub fn pearl_river_square() -> GeoBounds {
        GeoBounds::new(GeoRect::new(20.0, 112.0, 24.0, 116.0), 1000.0, 1000.0)
    }

    /// Non-square window with distinct spans per axis.
    pub fn south_china_sea() -> GeoBounds {
        GeoBounds::new(GeoRect::new(10.0, 105.0, 25.0, 125.0), 800.0, 600.0)
    }
}

/// The two-point scenario: a tropical storm strengthening to a typhoon.
pub fn two_point_track() -> Vec<Point> {
    vec![
        point(PointKind::Past, "2024-07-15T08:00:00+08:00", 19.0, 118.0, Some("TS"), None),
        point(PointKind::Actual, "2024-07-15T14:00:00+08:00", 19.6, 117.2, Some("T"), Some(150.0)),
    ]
}

/// A realistic track: past run with intensification, the actual fix, and
/// a forecast that weakens after landfall.
pub fn sample_track() -> Vec<Point> {
    vec![
        point(PointKind::Past, "2024-07-14T02:00:00+08:00", 16.2, 124.8, Some("TD"), Some(55.0)),
        point(PointKind::Past, "2024-07-14T08:00:00+08:00", 16.8, 123.5, None, Some(60.0)),
        point(PointKind::Past, "2024-07-14T14:00:00+08:00", 17.3, 122.1, Some("TS"), Some(75.0)),
        point(PointKind::Past, "2024-07-14T20:00:00+08:00", 17.9, 120.9, None, Some(85.0)),
        point(PointKind::Past, "2024-07-15T02:00:00+08:00", 18.5, 119.6, Some("STS"), Some(100.0)),
        point(PointKind::Actual, "2024-07-15T08:00:00+08:00", 19.2, 118.4, Some("T"), Some(130.0)),
        point(PointKind::Forecast, "2024-07-15T20:00:00+08:00", 20.4, 116.5, None, Some(140.0)),
        point(PointKind::Forecast, "2024-07-16T08:00:00+08:00", 21.5, 114.6, Some("STS"), Some(105.0)),
        point(PointKind::Forecast, "2024-07-17T08:00:00+08:00", 22.9, 112.0, Some("TD"), Some(50.0)),
    ]
}

pub fn sample_cyclone() -> Cyclone {
    Cyclone {
        id: 2407,
        name: "GAEMI".to_string(),
        name_zh: "格美".to_string(),
        bearing: "ESE".to_string(),
        distance: Some(420.0),
        track: sample_track(),
    }
}

/// The same storm as the feed serves it.
pub const SAMPLE_FEED_JSON: &str = r#"[
  {
    "id": 2407,
    "name": "GAEMI",
    "nameZH": "格美",
    "bearing": "ESE",
    "distance": 420,
    "track": [
      {"type": "P", "time": "2024-07-14T02:00:00+08:00", "latitude": 16.2, "longitude": 124.8, "classification": "TD", "windspeed": 55},
      {"type": "P", "time": "2024-07-14T08:00:00+08:00", "latitude": 16.8, "longitude": 123.5, "windspeed": 60},
      {"type": "A", "time": "2024-07-15T08:00:00+08:00", "latitude": 19.2, "longitude": 118.4, "classification": "T", "windspeed": 130},
      {"type": "F", "time": "2024-07-15T20:00:00+08:00", "latitude": 20.4, "longitude": 116.5}
    ]
  }
]"#;

/// Two short coastline features: a LineString and a MultiLineString.
pub fn sample_coastline() -> Coastline {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[113.5, 22.1], [114.0, 22.2], [114.4, 22.4]]}},
            {"type": "Feature", "geometry": {"type": "MultiLineString", "coordinates": [
                [[113.9, 22.25], [114.1, 22.3]],
                [[114.2, 22.5], [114.3, 22.55], [114.35, 22.6]]
            ]}}
        ]
    }"#;
    Coastline::from_geojson(json).unwrap_or_else(|e| panic!("bad coastline fixture: {}", e))
}
