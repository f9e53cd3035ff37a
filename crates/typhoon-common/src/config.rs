//! Immutable map configuration: anchor, scale, style and satellite provider.
//!
//! Loaded once from YAML (every field optional) and passed by reference to
//! the projector and renderer.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::bbox::{GeoPoint, GeoRect};
use crate::error::{MapError, MapResult};
use crate::style::TrackStyle;

/// Placeholders available to satellite key templates.
pub const SLOT_PLACEHOLDERS: &[&str] = &[
    "year",
    "month",
    "day",
    "hour",
    "utc_year",
    "utc_month",
    "utc_day",
    "utc_hour",
    "minute",
    "start_utc_day",
    "start_utc_hour",
    "start_utc_minute",
];

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub anchor: Anchor,
    /// Viewport used until the host reports a real size
    pub viewport: Viewport,
    pub style: TrackStyle,
    pub satellite: SatelliteConfig,
}

impl MapConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> MapResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| MapError::ConfigRead(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded map configuration");
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> MapResult<Self> {
        let config: MapConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MapResult<()> {
        self.anchor.validate()?;
        self.viewport.validate()?;
        self.style.validate()?;
        self.satellite.validate()
    }
}

/// The fixed reference location the visible window is centered on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Anchor {
    pub latitude: f64,
    pub longitude: f64,
    /// Angular degrees covered by one logical pixel
    pub degrees_per_pixel: f64,
}

impl Default for Anchor {
    fn default() -> Self {
        // Hong Kong Observatory
        Self {
            latitude: 22.3025,
            longitude: 114.174167,
            degrees_per_pixel: 0.033,
        }
    }
}

impl Anchor {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    fn validate(&self) -> MapResult<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(MapError::invalid_config("anchor.latitude", "must be within [-90, 90]"));
        }
        if !(-180.0..=360.0).contains(&self.longitude) {
            return Err(MapError::invalid_config("anchor.longitude", "must be within [-180, 360]"));
        }
        if !(self.degrees_per_pixel > 0.0) {
            return Err(MapError::invalid_config("anchor.degrees_per_pixel", "must be positive"));
        }
        Ok(())
    }
}

/// Logical viewport size and display density factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Physical pixels per logical pixel
    pub density: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            density: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, density: f64) -> Self {
        Self {
            width,
            height,
            density,
        }
    }

    pub fn validate(&self) -> MapResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(MapError::invalid_config("viewport", "width and height must be positive"));
        }
        if !(self.density > 0.0) {
            return Err(MapError::invalid_config("viewport.density", "must be positive"));
        }
        Ok(())
    }
}

/// External imagery provider description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatelliteConfig {
    /// Image key template, see [`SLOT_PLACEHOLDERS`]
    pub key_template: String,
    /// Fetch URL; `{key}` is replaced with the resolved image key
    pub url_template: String,
    /// Provider's local time offset from UTC
    pub utc_offset_minutes: i32,
    /// Frame cadence
    pub cadence_minutes: u32,
    /// Delay between capture and publication
    pub publication_delay_minutes: u32,
    /// Geographic rectangle each frame covers
    pub footprint: GeoRect,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            key_template: "{year}{month}{day}/ir_{utc_year}{utc_month}{utc_day}{utc_hour}{minute}_{start_utc_day}{start_utc_hour}{start_utc_minute}"
                .to_string(),
            url_template: "https://satellite.example.com/himawari/ir/{key}.png".to_string(),
            utc_offset_minutes: 8 * 60,
            cadence_minutes: 10,
            publication_delay_minutes: 60,
            footprint: GeoRect::new(5.0, 95.0, 40.0, 135.0),
        }
    }
}

impl SatelliteConfig {
    pub fn local_offset(&self) -> MapResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            MapError::invalid_config("satellite.utc_offset_minutes", "out of range")
        })
    }

    pub fn validate(&self) -> MapResult<()> {
        self.local_offset()?;

        if self.cadence_minutes == 0 || 60 % self.cadence_minutes != 0 {
            return Err(MapError::invalid_config(
                "satellite.cadence_minutes",
                "must divide an hour evenly",
            ));
        }

        if self.footprint.is_degenerate() {
            return Err(MapError::invalid_config("satellite.footprint", "min must be below max"));
        }

        for name in crate::template::placeholders(&self.key_template)? {
            if !SLOT_PLACEHOLDERS.contains(&name) {
                return Err(MapError::UnknownPlaceholder(name.to_string()));
            }
        }

        for name in crate::template::placeholders(&self.url_template)? {
            if name != "key" {
                return Err(MapError::UnknownPlaceholder(name.to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MapConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = MapConfig::from_yaml("{}").unwrap();
        assert_eq!(config, MapConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let yaml = r##"
anchor:
  degrees_per_pixel: 0.05
style:
  coastline_color: "#336699"
  palette:
    typhoon: [255, 0, 0]
satellite:
  cadence_minutes: 15
"##;
        let config = MapConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.anchor.degrees_per_pixel, 0.05);
        assert_eq!(config.anchor.latitude, 22.3025);
        assert_eq!(config.style.coastline_color.to_string(), "#336699");
        assert_eq!(config.style.palette.typhoon.to_string(), "#FF0000");
        assert_eq!(config.satellite.cadence_minutes, 15);
        assert_eq!(config.satellite.publication_delay_minutes, 60);
    }

    #[test]
    fn test_rejects_unknown_placeholder() {
        let yaml = "satellite:\n  key_template: \"{year}{week}\"\n";
        let err = MapConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, MapError::UnknownPlaceholder(ref p) if p == "week"));
    }

    #[test]
    fn test_rejects_uneven_cadence() {
        let yaml = "satellite:\n  cadence_minutes: 7\n";
        assert!(matches!(
            MapConfig::from_yaml(yaml),
            Err(MapError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.yaml");
        std::fs::write(&path, "viewport:\n  density: 2\n").unwrap();

        let config = MapConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.viewport.density, 2.0);

        let missing = MapConfig::from_yaml_file(dir.path().join("absent.yaml"));
        assert!(matches!(missing, Err(MapError::ConfigRead(_))));
    }

    #[test]
    fn test_default_yaml_round_trip() {
        let yaml = serde_yaml::to_string(&MapConfig::default()).unwrap();
        assert_eq!(MapConfig::from_yaml(&yaml).unwrap(), MapConfig::default());
    }

    #[test]
    fn test_rejects_zero_scale() {
        let yaml = "anchor:\n  degrees_per_pixel: 0\n";
        assert!(MapConfig::from_yaml(yaml).is_err());
    }
}
