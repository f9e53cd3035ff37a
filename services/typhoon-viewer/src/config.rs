//! Viewer configuration: feed endpoint, polling, assets and the map itself.
//!
//! Loaded from a single YAML file; every field has a default so the viewer
//! runs with no file at all.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};
use typhoon_common::MapConfig;

pub const DEFAULT_FEED_URL: &str = "https://www.i-learner.edu.hk/weather/api/v2/cyclone";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Cyclone feed endpoint returning a JSON array of cyclones
    pub feed_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    /// GeoJSON coastline drawn on the base layer
    pub coastline_path: Option<PathBuf>,
    /// TrueType font for cyclone labels
    pub font_path: Option<PathBuf>,
    pub map: MapConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            poll_interval_secs: 15 * 60,
            request_timeout_secs: 30,
            coastline_path: None,
            font_path: None,
            map: MapConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Load from `path`, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        info!(path = %path.display(), feed = %config.feed_url, "Loaded viewer configuration");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ViewerConfig = serde_yaml::from_str(yaml).context("Failed to parse YAML")?;
        config.map.validate().context("Invalid map configuration")?;
        anyhow::ensure!(config.poll_interval_secs > 0, "poll_interval_secs must be positive");
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = ViewerConfig::load(None).unwrap();
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.poll_interval(), Duration::from_secs(900));
        assert_eq!(config.map, MapConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
feed_url: "http://localhost:8080/cyclone"
poll_interval_secs: 60
font_path: /usr/share/fonts/NotoSansCJK.ttc
map:
  viewport:
    width: 640
    height: 480
  satellite:
    cadence_minutes: 10
"#
        )
        .unwrap();

        let config = ViewerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.feed_url, "http://localhost:8080/cyclone");
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.map.viewport.width, 640.0);
        assert_eq!(
            config.font_path.as_deref(),
            Some(Path::new("/usr/share/fonts/NotoSansCJK.ttc"))
        );
    }

    #[test]
    fn test_invalid_map_is_rejected() {
        let err = ViewerConfig::from_yaml("map:\n  satellite:\n    key_template: \"{nope}\"\n")
            .unwrap_err();
        assert!(format!("{:#}", err).contains("nope"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = ViewerConfig::load(Some(Path::new("/nonexistent/viewer.yaml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/viewer.yaml"));
    }
}
