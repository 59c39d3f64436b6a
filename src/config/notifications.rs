//! Notification bus configuration

use serde::Deserialize;

use crate::ports::MAX_NOTIFICATION_TTL_MS;

use super::error::ValidationError;

/// Notification bus settings
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    /// How long a notification stays live, in milliseconds
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,

    /// Broadcast channel capacity
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl NotificationsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_ms == 0 || self.ttl_ms > MAX_NOTIFICATION_TTL_MS {
            return Err(ValidationError::InvalidNotificationTtl {
                max: MAX_NOTIFICATION_TTL_MS,
            });
        }
        if self.capacity == 0 {
            return Err(ValidationError::InvalidNotificationCapacity);
        }
        Ok(())
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
            capacity: default_capacity(),
        }
    }
}

fn default_ttl_ms() -> u64 {
    5_000
}

fn default_capacity() -> usize {
    64
}
