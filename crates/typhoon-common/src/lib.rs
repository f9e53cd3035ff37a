//! Common types and utilities shared across the typhoon-track crates.

pub mod bbox;
pub mod coastline;
pub mod config;
pub mod cyclone;
pub mod error;
pub mod style;
pub mod template;
pub mod time;

pub use bbox::{GeoBounds, GeoPoint, GeoRect, LatLon, PixelPoint, PixelRect};
pub use coastline::{Coastline, Geometry};
pub use config::{Anchor, MapConfig, SatelliteConfig, Viewport};
pub use cyclone::{Classification, Cyclone, Point, PointKind};
pub use error::{MapError, MapResult};
pub use style::{ClassificationPalette, Color, TrackStyle};
