//! Notification bus.
//!
//! Built once at startup and shared by `Arc`. Producers call
//! [`NotificationPublisher::notify`]; observers either hold a broadcast
//! receiver or poll [`NotificationBus::active`]. Expired entries are
//! dropped on every emit, and at most `capacity` entries are retained.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;

use crate::domain::cycle::{CloseReason, CycleActivated, CycleClosed, CyclePhaseChanged};
use crate::domain::foundation::{DomainError, EventEnvelope, Timestamp};
use crate::domain::pdi::{ActionStatus, PdiActionStatusChanged, PdiDeleted, PdiStatusChanged};
use crate::ports::{Clock, EventHandler, Notification, NotificationKind, NotificationPublisher};

/// Fan-out channel for user-facing notifications with automatic expiry.
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
    live: Mutex<Vec<Notification>>,
    capacity: usize,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl NotificationBus {
    /// Lifecycle event types turned into notifications.
    pub const EVENT_TYPES: [&'static str; 7] = [
        "cycle.activated.v1",
        "cycle.closed.v1",
        "cycle.phase_changed.v1",
        "cycle.equalization_started.v1",
        "pdi.status_changed.v1",
        "pdi.action_status_changed.v1",
        "pdi.deleted.v1",
    ];

    /// `capacity` bounds both the broadcast buffer and the retained list.
    /// A receiver that falls further behind skips the oldest notifications.
    pub fn new(capacity: usize, ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            live: Mutex::new(Vec::new()),
            capacity,
            ttl_ms,
            clock,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Builds and emits a notification stamped with the bus clock.
    pub fn push(
        &self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Notification, DomainError> {
        let notification = Notification::new(kind, title, message, self.clock.now(), self.ttl_ms);
        self.notify(notification.clone())?;
        Ok(notification)
    }

    /// Unexpired notifications, oldest first. Expired ones are removed.
    pub fn active(&self, now: Timestamp) -> Vec<Notification> {
        let mut live = self.live();
        live.retain(|n| !n.is_expired(now));
        live.clone()
    }

    /// Removes one notification before it expires. Returns whether it existed.
    pub fn dismiss(&self, id: &str) -> bool {
        let mut live = self.live();
        let before = live.len();
        live.retain(|n| n.id != id);
        live.len() != before
    }

    fn live(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.live.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn describe(
        event: &EventEnvelope,
    ) -> Result<Option<(NotificationKind, String, String)>, DomainError> {
        let described = match event.event_type.as_str() {
            "cycle.activated.v1" => {
                let e: CycleActivated = event.payload_as()?;
                let message = match e.superseded_cycle_ids.len() {
                    0 => format!("{} is now open", e.cycle_name),
                    n => format!("{} is now open; {} previous cycle(s) closed", e.cycle_name, n),
                };
                Some((NotificationKind::Success, "Cycle opened".to_string(), message))
            }
            "cycle.closed.v1" => {
                let e: CycleClosed = event.payload_as()?;
                let message = match e.reason {
                    CloseReason::Explicit => format!("{} was closed", e.cycle_name),
                    CloseReason::Superseded { .. } => {
                        format!("{} was closed because another cycle opened", e.cycle_name)
                    }
                };
                Some((NotificationKind::Info, "Cycle closed".to_string(), message))
            }
            "cycle.phase_changed.v1" => {
                let e: CyclePhaseChanged = event.payload_as()?;
                let kind = if e.forced {
                    NotificationKind::Warning
                } else {
                    NotificationKind::Info
                };
                Some((kind, "Phase changed".to_string(), format!("{} -> {}", e.from, e.to)))
            }
            "cycle.equalization_started.v1" => Some((
                NotificationKind::Info,
                "Equalization started".to_string(),
                "New assessments are closed".to_string(),
            )),
            "pdi.status_changed.v1" => {
                let e: PdiStatusChanged = event.payload_as()?;
                Some((
                    NotificationKind::Info,
                    "Plan status changed".to_string(),
                    format!("{} -> {}", e.from, e.to),
                ))
            }
            "pdi.action_status_changed.v1" => {
                let e: PdiActionStatusChanged = event.payload_as()?;
                let kind = if e.to == ActionStatus::Completed {
                    NotificationKind::Success
                } else {
                    NotificationKind::Info
                };
                Some((kind, e.action_title, format!("{} -> {}", e.from, e.to)))
            }
            "pdi.deleted.v1" => {
                let e: PdiDeleted = event.payload_as()?;
                Some((
                    NotificationKind::Info,
                    "Plan deleted".to_string(),
                    format!("{} was deleted", e.title),
                ))
            }
            _ => None,
        };
        Ok(described)
    }
}

impl NotificationPublisher for NotificationBus {
    fn notify(&self, notification: Notification) -> Result<(), DomainError> {
        {
            let now = self.clock.now();
            let mut live = self.live();
            live.retain(|n| !n.is_expired(now));
            if live.len() >= self.capacity {
                let overflow = live.len() + 1 - self.capacity;
                live.drain(..overflow);
            }
            live.push(notification.clone());
        }
        // No receivers is fine; `active` still serves the notification.
        let receivers = self.sender.send(notification).unwrap_or(0);
        tracing::debug!(receivers, "Notification emitted");
        Ok(())
    }
}

#[async_trait]
impl EventHandler for NotificationBus {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if let Some((kind, title, message)) = Self::describe(&event)? {
            self.push(kind, title, message)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "NotificationBus"
    }
}
