//! Coastline reference geometry (GeoJSON FeatureCollection subset).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::bbox::GeoPoint;
use crate::error::MapResult;

/// A GeoJSON position: `[longitude, latitude]`, optionally with altitude.
pub type Position = Vec<f64>;

/// Static coastline data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Coastline {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// GeoJSON allows a null geometry
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// Line geometry; anything else in the file is kept as `Unsupported` and skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    #[serde(other)]
    Unsupported,
}

impl Coastline {
    pub fn from_geojson(json: &str) -> MapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> MapResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_geojson(&content)
    }

    /// Every polyline in the collection, flattening MultiLineStrings.
    pub fn polylines(&self) -> impl Iterator<Item = Vec<GeoPoint>> + '_ {
        self.features
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .flat_map(Geometry::lines)
            .map(|line| line.iter().filter_map(to_geo).collect())
    }
}

impl Geometry {
    fn lines(&self) -> Box<dyn Iterator<Item = &Vec<Position>> + '_> {
        match self {
            Geometry::LineString { coordinates } => Box::new(std::iter::once(coordinates)),
            Geometry::MultiLineString { coordinates } => Box::new(coordinates.iter()),
            Geometry::Unsupported => Box::new(std::iter::empty()),
        }
    }
}

fn to_geo(p: &Position) -> Option<GeoPoint> {
    match p.as_slice() {
        [lon, lat, ..] => Some(GeoPoint::new(*lat, *lon)),
        _ => None,
    }
}
