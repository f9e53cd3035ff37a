//! Geographic and pixel-space rectangles.

use serde::{Deserialize, Serialize};

/// Anything that sits at a geographic position.
pub trait LatLon {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a "lat,lon" pair, as given on the command line.
    pub fn from_pair(s: &str) -> Option<Self> {
        let (lat, lon) = s.split_once(',')?;
        Some(Self::new(lat.trim().parse().ok()?, lon.trim().parse().ok()?))
    }
}

impl LatLon for GeoPoint {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A geographic rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRect {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl GeoRect {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Longitude span in degrees.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude span in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a position is contained within this rectangle (edges inclusive).
    pub fn contains(&self, p: &impl LatLon) -> bool {
        let (lat, lon) = (p.latitude(), p.longitude());
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// A rectangle with min > max or zero extent cannot be projected onto.
    pub fn is_degenerate(&self) -> bool {
        !(self.lat_span() > 0.0 && self.lon_span() > 0.0)
    }
}

/// The geographic window currently mapped onto the pixel canvas.
///
/// Derived fresh for every render pass and never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
    /// Canvas width in physical pixels
    pub width: f64,
    /// Canvas height in physical pixels
    pub height: f64,
}

impl GeoBounds {
    pub fn new(rect: GeoRect, width: f64, height: f64) -> Self {
        Self {
            min_lat: rect.min_lat,
            min_lon: rect.min_lon,
            max_lat: rect.max_lat,
            max_lon: rect.max_lon,
            width,
            height,
        }
    }

    pub fn rect(&self) -> GeoRect {
        GeoRect::new(self.min_lat, self.min_lon, self.max_lat, self.max_lon)
    }

    /// Pixel size rounded for surface allocation.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }
}

/// A position on the drawing surface, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Build from two opposite corners in any order.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}
