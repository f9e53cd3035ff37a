//! Error types for typhoon-track.

use thiserror::Error;

/// Result type alias using MapError.
pub type MapResult<T> = Result<T, MapError>;

/// Primary error type for model, configuration and time handling.
#[derive(Debug, Error)]
pub enum MapError {
    // === Configuration Errors ===
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Failed to read configuration: {0}")]
    ConfigRead(String),

    #[error("Unknown template placeholder '{{{0}}}'")]
    UnknownPlaceholder(String),

    #[error("Unterminated placeholder in template: {0}")]
    UnterminatedPlaceholder(String),

    // === Data Errors ===
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Failed to parse data: {0}")]
    DataParse(String),
}

impl MapError {
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        MapError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for MapError {
    fn from(err: std::io::Error) -> Self {
        MapError::ConfigRead(err.to_string())
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::DataParse(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for MapError {
    fn from(err: serde_yaml::Error) -> Self {
        MapError::ConfigRead(format!("YAML error: {}", err))
    }
}
