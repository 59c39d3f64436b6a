//! Notification port - short-lived, fire-and-observe messages for users.
//!
//! Notifications replace ad-hoc toasts: producers push them, observers
//! subscribe, and every notification expires on its own after a fixed
//! time to live.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Timestamp};

/// Longest time a notification may stay visible (10 minutes).
pub const MAX_NOTIFICATION_TTL_MS: u64 = 600_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Notification {
    /// Creates a notification that expires `ttl_ms` after `issued_at`.
    ///
    /// `ttl_ms` is capped at [`MAX_NOTIFICATION_TTL_MS`].
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        issued_at: Timestamp,
        ttl_ms: u64,
    ) -> Self {
        let ttl = ttl_ms.min(MAX_NOTIFICATION_TTL_MS) as i64;
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            message: message.into(),
            issued_at,
            expires_at: issued_at.add_millis(ttl),
        }
    }

    /// Expired once `now` reaches `expires_at`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        !now.is_before(&self.expires_at)
    }
}

/// Port for emitting notifications.
pub trait NotificationPublisher: Send + Sync {
    /// Emit a notification. Having no observer is not an error.
    fn notify(&self, notification: Notification) -> Result<(), DomainError>;
}
