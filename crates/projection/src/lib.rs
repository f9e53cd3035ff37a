//! Coordinate transformations between geographic and canvas space.
//!
//! Only a flat equirectangular mapping is provided; it is accurate near the
//! anchor latitude, which is all the map window ever shows.

pub mod equirectangular;

pub use equirectangular::{bounds_for_viewport, project, project_rect, unproject};
