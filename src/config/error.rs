//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Default cycle duration must be between 1 and {max} days")]
    InvalidCycleDuration { max: i64 },

    #[error("Notification TTL must be between 1 and {max} ms")]
    InvalidNotificationTtl { max: u64 },

    #[error("Notification channel capacity must be greater than zero")]
    InvalidNotificationCapacity,

    #[error("Log level filter is empty")]
    EmptyLogLevel,
}
