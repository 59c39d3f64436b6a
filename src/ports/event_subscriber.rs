//! EventSubscriber port - registers handlers for lifecycle events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Handlers should be idempotent; the same envelope may be delivered twice.
///
/// # Example
///
/// ```ignore
/// #[async_trait]
/// impl EventHandler for OverdueNotifier {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let payload: PdiStatusChanged = event.payload_as()?;
///         // ...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "OverdueNotifier"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for log lines and error messages.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events by event type.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe one handler to several event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// Combined publish/subscribe capability.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
