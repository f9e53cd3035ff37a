//! Error types for satellite slot resolution and frame loading.

use thiserror::Error;
use typhoon_common::MapError;

pub type SatelliteResult<T> = Result<T, SatelliteError>;

#[derive(Debug, Error)]
pub enum SatelliteError {
    #[error("Configuration error: {0}")]
    Config(#[from] MapError),

    #[error("Failed to decode satellite frame: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Satellite frame is empty")]
    EmptyFrame,

    #[error("Fetch failed: {0}")]
    Fetch(String),
}
