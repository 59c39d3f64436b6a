//! EventPublisher port - publishes lifecycle events after persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Handlers publish only after the changed records were stored, so a
/// subscriber never sees an event for a transition that was rolled back.
///
/// # Example
///
/// ```ignore
/// let envelope = event.to_envelope()?.with_correlation_id(metadata.correlation_id());
/// repository.update(&cycle).await?;
/// publish_committed(&*publisher, vec![envelope]).await;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several events in order.
    ///
    /// Every event is delivered even when an earlier one fails; the
    /// returned error summarizes all failures.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
