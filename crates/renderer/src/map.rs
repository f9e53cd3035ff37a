//! The layered map renderer.

use chrono::{DateTime, Utc};
use image::RgbaImage;
use projection::bounds_for_viewport;
use satellite::{SatelliteRequest, SatelliteResult, Ticket};
use tiny_skia::Pixmap;
use tracing::{debug, warn};
use typhoon_common::{GeoBounds, MapConfig};

use crate::error::{RenderError, RenderResult};
use crate::inputs::{InputSet, RenderInputs};
use crate::labels::LabelRenderer;
use crate::layers::{CoastlineLayer, DrawContext, Layer, LayerKind, SatelliteLayer, TrackLayer};
use crate::surface::{self, Surface};

/// Result of one render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderOutcome {
    /// Layers whose surfaces were redrawn, bottom to top
    pub redrawn: Vec<LayerKind>,
    /// Satellite frame the host should fetch
    pub satellite_request: Option<SatelliteRequest>,
}

/// Owns the three layer surfaces and redraws them as inputs change.
pub struct LayeredRenderer {
    config: MapConfig,
    labels: Option<LabelRenderer>,
    satellite: SatelliteLayer,
    coastline: CoastlineLayer,
    track: TrackLayer,
    previous: Option<RenderInputs>,
    bounds: GeoBounds,
    forced: Vec<LayerKind>,
}

impl LayeredRenderer {
    /// Build a renderer with blank surfaces sized for the configured
    /// viewport. Labels are skipped when no font is given.
    pub fn new(config: MapConfig, labels: Option<LabelRenderer>) -> RenderResult<Self> {
        config.validate()?;
        if labels.is_none() {
            warn!("No label font configured; cyclone labels will not be drawn");
        }

        let bounds = bounds_for_viewport(&config.anchor, &config.viewport);
        Ok(Self {
            satellite: SatelliteLayer::new(Surface::for_bounds(&bounds)?),
            coastline: CoastlineLayer::new(Surface::for_bounds(&bounds)?),
            track: TrackLayer::new(Surface::for_bounds(&bounds)?),
            config,
            labels,
            previous: None,
            bounds,
            forced: Vec::new(),
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Bounds of the last render pass.
    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    /// Redraw `kind` on the next pass even if its inputs are unchanged.
    pub fn invalidate(&mut self, kind: LayerKind) {
        if !self.forced.contains(&kind) {
            self.forced.push(kind);
        }
    }

    pub fn render(&mut self, inputs: &RenderInputs) -> RenderResult<RenderOutcome> {
        self.render_at(inputs, Utc::now())
    }

    /// Render with an explicit wall clock for live satellite slots.
    pub fn render_at(&mut self, inputs: &RenderInputs, now: DateTime<Utc>) -> RenderResult<RenderOutcome> {
        let bounds = bounds_for_viewport(&self.config.anchor, &inputs.viewport);
        let (width, height) = bounds.pixel_size();
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSurface { width, height });
        }
        inputs.viewport.validate()?;

        let changed = match &self.previous {
            Some(prev) => inputs.changed_since(prev),
            None => InputSet::all(),
        };

        let ctx = DrawContext {
            inputs,
            bounds,
            config: &self.config,
            labels: self.labels.as_ref(),
            now,
        };

        let mut redrawn = Vec::new();
        let layers: [&mut dyn Layer; 3] = [&mut self.satellite, &mut self.coastline, &mut self.track];
        for layer in layers {
            if layer.dependencies().intersects(changed) || self.forced.contains(&layer.kind()) {
                layer.draw(&ctx)?;
                redrawn.push(layer.kind());
            }
        }

        debug!(changed = ?changed, redrawn = ?redrawn, "Render pass complete");

        self.forced.clear();
        self.bounds = bounds;
        self.previous = Some(inputs.clone());

        Ok(RenderOutcome {
            redrawn,
            satellite_request: self.satellite.take_request(),
        })
    }

    /// Hand a fetched satellite frame, or the fetch error, back to the
    /// layer. Returns `false` when the ticket was superseded.
    pub fn complete_satellite(
        &mut self,
        ticket: Ticket,
        frame: SatelliteResult<RgbaImage>,
    ) -> RenderResult<bool> {
        self.satellite.complete(ticket, frame)
    }

    pub fn surface(&self, kind: LayerKind) -> &Surface {
        match kind {
            LayerKind::Satellite => self.satellite.surface(),
            LayerKind::Coastline => self.coastline.surface(),
            LayerKind::Track => self.track.surface(),
        }
    }

    /// Stack satellite, coastline and track into one frame.
    pub fn composite(&self) -> RenderResult<Pixmap> {
        let (width, height) = self.bounds.pixel_size();
        surface::composite(
            &[
                self.satellite.surface().pixmap(),
                self.coastline.surface().pixmap(),
                self.track.surface().pixmap(),
            ],
            width,
            height,
        )
    }

    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        surface::encode_png(&self.composite()?)
    }
}
