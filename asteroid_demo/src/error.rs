//! Application-level errors

use field_engine::config::ConfigError;
use field_engine::EngineError;
use thiserror::Error;

use crate::field::FieldError;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Asteroid field error
    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
