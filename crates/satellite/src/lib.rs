//! Satellite imagery slots for the track map.
//!
//! The imagery provider publishes frames on a fixed cadence, roughly an
//! hour after capture. This crate turns an instant into the newest frame
//! that should already be published:
//! - [`slot`]: quantization, image key and URL, projected footprint
//! - [`loader`]: request generations and frame decoding

pub mod error;
pub mod loader;
pub mod slot;

pub use error::{SatelliteError, SatelliteResult};
pub use loader::{decode_frame, RequestTracker, SatelliteRequest, Ticket};
pub use slot::{resolve_slot, SatelliteSlot};
