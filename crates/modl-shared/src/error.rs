//! Application error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}
