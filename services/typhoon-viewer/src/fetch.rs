//! Cyclone feed and satellite frame sources.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use image::RgbaImage;
use reqwest::Client;
use satellite::{decode_frame, SatelliteError, SatelliteResult};
use tracing::{debug, instrument};
use typhoon_common::Cyclone;

/// Somewhere the current cyclone list comes from.
#[async_trait]
pub trait CycloneSource: Send + Sync {
    async fn fetch_cyclones(&self) -> Result<Vec<Cyclone>>;
}

/// Somewhere satellite frames come from.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Fetch and decode the frame at `url`. Any failure is reported as a
    /// [`SatelliteError`] so the renderer can blank the overlay.
    async fn fetch_frame(&self, url: &str) -> SatelliteResult<RgbaImage>;
}

pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("typhoon-viewer/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// The JSON cyclone feed over HTTP.
pub struct HttpFeed {
    client: Client,
    url: String,
}

impl HttpFeed {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CycloneSource for HttpFeed {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_cyclones(&self) -> Result<Vec<Cyclone>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Cyclone feed request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Cyclone feed returned HTTP {}", status));
        }

        let cyclones: Vec<Cyclone> = response
            .json()
            .await
            .context("Failed to parse cyclone feed")?;
        debug!(count = cyclones.len(), "Fetched cyclone feed");
        Ok(cyclones)
    }
}

/// A saved feed response on disk.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CycloneSource for FileFeed {
    async fn fetch_cyclones(&self) -> Result<Vec<Cyclone>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read feed file: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse feed file: {}", self.path.display()))
    }
}

/// Satellite frames over HTTP.
pub struct HttpFrames {
    client: Client,
}

impl HttpFrames {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await
    }
}

#[async_trait]
impl FrameSource for HttpFrames {
    #[instrument(skip(self))]
    async fn fetch_frame(&self, url: &str) -> SatelliteResult<RgbaImage> {
        let bytes = self
            .fetch_bytes(url)
            .await
            .map_err(|e| SatelliteError::Fetch(e.to_string()))?;
        debug!(bytes = bytes.len(), "Fetched satellite frame");
        decode_frame(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::SAMPLE_FEED_JSON;

    #[tokio::test]
    async fn test_file_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.json");
        std::fs::write(&path, SAMPLE_FEED_JSON).unwrap();

        let cyclones = FileFeed::new(&path).fetch_cyclones().await.unwrap();
        assert_eq!(cyclones.len(), 1);
        assert_eq!(cyclones[0].summary(), "GAEMI 420km ESE");
        assert_eq!(cyclones[0].track.len(), 4);
    }

    #[tokio::test]
    async fn test_file_feed_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileFeed::new(&path).fetch_cyclones().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse feed file"));
    }
}
