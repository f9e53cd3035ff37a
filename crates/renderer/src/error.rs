//! Error types for the layered renderer.

use thiserror::Error;
use typhoon_common::MapError;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot allocate a {width}x{height} drawing surface")]
    InvalidSurface { width: u32, height: u32 },

    #[error("Configuration error: {0}")]
    Config(#[from] MapError),

    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
