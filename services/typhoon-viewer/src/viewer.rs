//! Drives the renderer: keeps inputs current, completes satellite requests
//! and writes composited frames.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use renderer::{LayerKind, LayeredRenderer, RenderInputs};
use tracing::{debug, info, warn};
use track::TimeCursor;
use typhoon_common::{Coastline, GeoPoint};

use crate::fetch::{CycloneSource, FrameSource};

pub struct Viewer {
    renderer: LayeredRenderer,
    inputs: RenderInputs,
    feed: Box<dyn CycloneSource>,
    frames: Box<dyn FrameSource>,
    output_dir: PathBuf,
}

impl Viewer {
    pub fn new(
        renderer: LayeredRenderer,
        feed: Box<dyn CycloneSource>,
        frames: Box<dyn FrameSource>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let inputs = RenderInputs::new(renderer.config().viewport);
        Self {
            renderer,
            inputs,
            feed,
            frames,
            output_dir: output_dir.into(),
        }
    }

    pub fn set_coastline(&mut self, coastline: Coastline) {
        self.inputs.coastline = Some(Arc::new(coastline));
    }

    pub fn set_viewer_location(&mut self, location: Option<GeoPoint>) {
        self.inputs.viewer_location = location;
    }

    pub fn set_show_satellite(&mut self, show: bool) {
        self.inputs.show_satellite = show;
    }

    pub fn inputs(&self) -> &RenderInputs {
        &self.inputs
    }

    /// Replace the cyclone list from the feed. A failed fetch keeps the
    /// previous data and is only logged.
    pub async fn refresh(&mut self) -> bool {
        match self.feed.fetch_cyclones().await {
            Ok(cyclones) => {
                for cyclone in &cyclones {
                    info!(summary = %cyclone.summary(), name_zh = %cyclone.name_zh, "Active cyclone");
                }
                if cyclones.is_empty() {
                    info!("No active cyclones");
                }
                self.inputs.cyclones = Arc::new(cyclones);
                // A new poll may have a newer satellite frame
                self.renderer.invalidate(LayerKind::Satellite);
                true
            }
            Err(e) => {
                warn!(error = %e, "Cyclone feed refresh failed, keeping previous data");
                false
            }
        }
    }

    /// Render one frame for `query` (live when `None`) and write it out.
    pub async fn render_frame(&mut self, query: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<PathBuf> {
        self.inputs.query_time = query;
        let outcome = self
            .renderer
            .render_at(&self.inputs, now)
            .context("Render pass failed")?;

        if let Some(request) = outcome.satellite_request {
            let frame = self.frames.fetch_frame(request.url()).await;
            if let Err(e) = &frame {
                debug!(url = %request.url(), error = %e, "Satellite frame fetch failed");
            }
            self.renderer.complete_satellite(request.ticket, frame)?;
        }

        let png = self.renderer.encode_png()?;
        let path = frame_path(&self.output_dir, query.unwrap_or(now));
        tokio::fs::write(&path, &png)
            .await
            .with_context(|| format!("Failed to write frame: {}", path.display()))?;

        info!(
            path = %path.display(),
            redrawn = ?outcome.redrawn,
            bytes = png.len(),
            "Wrote frame"
        );
        Ok(path)
    }

    /// Render `count` frames, stepping the query time by `step` each time.
    pub async fn scrub(
        &mut self,
        start: Option<DateTime<Utc>>,
        step: Duration,
        count: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<PathBuf>> {
        let mut cursor = match start {
            Some(t) => TimeCursor::at(t),
            None => TimeCursor::live(),
        };

        let mut written = Vec::with_capacity(count);
        for n in 0..count {
            if n > 0 {
                cursor.step(step, now);
            }
            written.push(self.render_frame(cursor.query(), now).await?);
        }
        Ok(written)
    }
}

fn frame_path(dir: &Path, at: DateTime<Utc>) -> PathBuf {
    dir.join(format!("frame-{}.png", at.format("%Y%m%dT%H%MZ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use image::{Rgba, RgbaImage};
    use satellite::{SatelliteError, SatelliteResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use test_utils::{sample_cyclone, utc};
    use typhoon_common::{Cyclone, MapConfig, Viewport};

    struct FixedFeed(Option<Vec<Cyclone>>);

    #[async_trait]
    impl CycloneSource for FixedFeed {
        async fn fetch_cyclones(&self) -> Result<Vec<Cyclone>> {
            self.0.clone().ok_or_else(|| anyhow!("feed offline"))
        }
    }

    struct CountingFrames {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl FrameSource for CountingFrames {
        async fn fetch_frame(&self, _url: &str) -> SatelliteResult<RgbaImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SatelliteError::Fetch("404".to_string()))
            } else {
                Ok(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 200, 255])))
            }
        }
    }

    fn viewer(feed: FixedFeed, fail: bool, dir: &Path) -> (Viewer, Arc<AtomicUsize>) {
        let config = MapConfig {
            viewport: Viewport::new(200.0, 150.0, 1.0),
            ..MapConfig::default()
        };
        let calls = Arc::new(AtomicUsize::new(0));
        let frames = CountingFrames {
            calls: calls.clone(),
            fail,
        };
        let renderer = LayeredRenderer::new(config, None).unwrap();
        (Viewer::new(renderer, Box::new(feed), Box::new(frames), dir), calls)
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let (mut v, _) = viewer(FixedFeed(Some(vec![sample_cyclone()])), false, dir.path());
        assert!(v.refresh().await);
        assert_eq!(v.inputs().cyclones.len(), 1);

        v.feed = Box::new(FixedFeed(None));
        assert!(!v.refresh().await);
        assert_eq!(v.inputs().cyclones.len(), 1);
    }

    #[tokio::test]
    async fn test_render_frame_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let (mut v, calls) = viewer(FixedFeed(Some(vec![sample_cyclone()])), false, dir.path());
        v.refresh().await;

        let now = utc(2024, 7, 15, 6, 7);
        let path = v.render_frame(None, now).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "frame-20240715T0607Z.png");

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
        // Satellite hidden: nothing fetched
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_satellite_fetch_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (mut v, calls) = viewer(FixedFeed(Some(Vec::new())), true, dir.path());
        v.set_show_satellite(true);

        let path = v.render_frame(None, utc(2024, 7, 15, 6, 7)).await.unwrap();
        assert!(path.exists());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_scrub_writes_one_file_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let (mut v, calls) = viewer(FixedFeed(Some(vec![sample_cyclone()])), false, dir.path());
        v.set_show_satellite(true);
        v.refresh().await;

        let start = utc(2024, 7, 14, 0, 0);
        let paths = v
            .scrub(Some(start), Duration::hours(1), 3, utc(2024, 7, 15, 6, 7))
            .await
            .unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths[2].ends_with("frame-20240714T0200Z.png"));
        // Each step changes the query time, so each needs a new frame
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
