//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `REVIEW_LIFECYCLE`
//! prefix and `__` between nested keys. Every value has a default, so an
//! empty environment loads.
//!
//! The bundled binary only reads `logging` and the classifier. The
//! `notifications` section and [`AppConfig::activation_policy`] are for
//! library callers that build a `NotificationBus` and the command handlers.
//!
//! # Example
//!
//! ```no_run
//! use review_lifecycle::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Notifications live for {} ms", config.notifications.ttl_ms);
//! ```

mod error;
mod lifecycle;
mod logging;
mod notifications;

pub use error::{ConfigError, ValidationError};
pub use lifecycle::LifecycleConfig;
pub use logging::LoggingConfig;
pub use notifications::NotificationsConfig;

use serde::Deserialize;

use crate::domain::cycle::ActivationPolicy;
use crate::domain::deadline::DeadlineClassifier;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Cycle activation and deadline policies
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Notification bus
    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REVIEW_LIFECYCLE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `REVIEW_LIFECYCLE__LIFECYCLE__DAY_COUNTING=exact` -> `lifecycle.day_counting = exact`
    /// - `REVIEW_LIFECYCLE__NOTIFICATIONS__TTL_MS=3000` -> `notifications.ttl_ms = 3000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REVIEW_LIFECYCLE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first out-of-range value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.lifecycle.validate()?;
        self.notifications.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    pub fn activation_policy(&self) -> ActivationPolicy {
        self.lifecycle.activation_policy()
    }

    /// The single classifier shared by every deadline call site.
    pub fn classifier(&self) -> DeadlineClassifier {
        self.lifecycle.classifier()
    }
}
