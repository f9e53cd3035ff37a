//! Cyclone and track point model, as served by the cyclone feed.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::bbox::{GeoPoint, LatLon};

/// A tropical cyclone and its track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cyclone {
    pub id: i64,
    /// English name
    pub name: String,
    /// Local-script name
    #[serde(rename = "nameZH", default, deserialize_with = "null_as_empty")]
    pub name_zh: String,
    /// 16-point compass bearing from the anchor, e.g. "SSE"
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bearing: String,
    /// Distance from the anchor in kilometres
    #[serde(default)]
    pub distance: Option<f64>,
    /// Track points, chronological ascending
    #[serde(default)]
    pub track: Vec<Point>,
}

impl Cyclone {
    /// Name in both scripts, e.g. "SAOLA 蘇拉".
    pub fn display_name(&self) -> String {
        if self.name_zh.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.name_zh)
        }
    }

    /// One-line listing, e.g. "SAOLA 420km SSE".
    pub fn summary(&self) -> String {
        match self.distance {
            Some(d) => format!("{} {}km {}", self.name, d, self.bearing),
            None => format!("{} {}", self.name, self.bearing),
        }
    }
}

/// The feed sends `null` for names and bearings it doesn't have.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Which part of the track a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    /// Historical observation
    #[serde(rename = "P", alias = "past", alias = "Past")]
    Past,
    /// The most recent confirmed observation
    #[serde(rename = "A", alias = "actual", alias = "Actual")]
    Actual,
    /// Predicted future position
    #[serde(rename = "F", alias = "forecast", alias = "Forecast")]
    Forecast,
}

/// A single track sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "type")]
    pub kind: PointKind,
    #[serde(with = "crate::time::flexible")]
    pub time: DateTime<FixedOffset>,
    pub latitude: f64,
    pub longitude: f64,
    /// Present only where the intensity category changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    /// Sustained wind speed in km/h
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windspeed: Option<f64>,
}

impl Point {
    /// The timestamp as an absolute instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.time.with_timezone(&Utc)
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

impl LatLon for Point {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Storm intensity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
    Low,
    TropicalDepression,
    TropicalStorm,
    SevereTropicalStorm,
    Typhoon,
    SevereTyphoon,
    SuperTyphoon,
    /// A code the feed sent that we don't recognize; still a segment boundary
    Unknown,
}

impl Classification {
    pub const ALL: [Classification; 8] = [
        Classification::Low,
        Classification::TropicalDepression,
        Classification::TropicalStorm,
        Classification::SevereTropicalStorm,
        Classification::Typhoon,
        Classification::SevereTyphoon,
        Classification::SuperTyphoon,
        Classification::Unknown,
    ];

    /// Parse a feed code. Case-insensitive; long names accepted.
    pub fn from_code(code: &str) -> Self {
        let normalized: String = code
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "low" | "l" | "lowpressurearea" => Classification::Low,
            "td" | "tropicaldepression" => Classification::TropicalDepression,
            "ts" | "tropicalstorm" => Classification::TropicalStorm,
            "sts" | "severetropicalstorm" => Classification::SevereTropicalStorm,
            "t" | "ty" | "typhoon" => Classification::Typhoon,
            "st" | "severetyphoon" => Classification::SevereTyphoon,
            "supert" | "superty" | "sty" | "supertyphoon" => Classification::SuperTyphoon,
            _ => Classification::Unknown,
        }
    }

    /// Canonical feed code.
    pub fn code(&self) -> &'static str {
        match self {
            Classification::Low => "LOW",
            Classification::TropicalDepression => "TD",
            Classification::TropicalStorm => "TS",
            Classification::SevereTropicalStorm => "STS",
            Classification::Typhoon => "T",
            Classification::SevereTyphoon => "ST",
            Classification::SuperTyphoon => "SuperT",
            Classification::Unknown => "UNKNOWN",
        }
    }
}

impl From<String> for Classification {
    fn from(code: String) -> Self {
        Classification::from_code(&code)
    }
}

impl From<Classification> for String {
    fn from(c: Classification) -> Self {
        c.code().to_string()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
