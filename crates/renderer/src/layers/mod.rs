//! The three stacked map layers.
//!
//! Each layer owns its surface and declares the inputs it depends on; the
//! renderer redraws a layer only when one of those inputs changed.

pub mod coastline;
pub mod satellite;
pub mod track;

pub use coastline::CoastlineLayer;
pub use satellite::SatelliteLayer;
pub use track::TrackLayer;

use chrono::{DateTime, Utc};
use std::fmt;
use typhoon_common::{GeoBounds, MapConfig};

use crate::error::RenderResult;
use crate::inputs::{InputSet, RenderInputs};
use crate::labels::LabelRenderer;
use crate::surface::Surface;

/// Layer identity, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Satellite,
    Coastline,
    Track,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerKind::Satellite => "satellite",
            LayerKind::Coastline => "coastline",
            LayerKind::Track => "track",
        };
        f.write_str(name)
    }
}

/// Shared state for one render pass.
pub struct DrawContext<'a> {
    pub inputs: &'a RenderInputs,
    /// Computed once per pass and shared by every layer
    pub bounds: GeoBounds,
    pub config: &'a MapConfig,
    pub labels: Option<&'a LabelRenderer>,
    /// Wall clock, used when no query time is set
    pub now: DateTime<Utc>,
}

impl DrawContext<'_> {
    pub fn density(&self) -> f32 {
        self.inputs.viewport.density as f32
    }
}

pub trait Layer {
    fn kind(&self) -> LayerKind;

    fn dependencies(&self) -> InputSet;

    fn surface(&self) -> &Surface;

    /// Redraw the layer's surface for the current pass.
    fn draw(&mut self, ctx: &DrawContext<'_>) -> RenderResult<()>;
}
