//! Layered rendering of cyclone tracks over coastline and satellite imagery.
//!
//! Three surfaces are kept, each redrawn only when its inputs change:
//! - Satellite: the newest published frame, stretched to its footprint
//! - Coastline: static reference polylines
//! - Track: viewer marker, cloud discs, track spans, markers and labels
//!
//! [`LayeredRenderer::composite`] stacks them in that order.

pub mod error;
pub mod inputs;
pub mod labels;
pub mod layers;
pub mod map;
pub mod surface;

pub use error::{RenderError, RenderResult};
pub use inputs::{Input, InputSet, RenderInputs};
pub use labels::{label_lines, LabelRenderer};
pub use layers::LayerKind;
pub use map::{LayeredRenderer, RenderOutcome};
pub use surface::Surface;
