//! Application handlers.
//!
//! Each command handler loads records through the repository ports, asks the
//! domain to validate and apply the transition, persists every changed
//! record, and only then publishes events. A rejected transition leaves
//! storage untouched and publishes nothing. Once records are stored the
//! command succeeds; publisher failures are logged, not returned.

pub mod cycle;
pub mod dashboard;
pub mod pdi;

#[cfg(test)]
pub(crate) mod testing;

pub use cycle::{
    ActivateCycleCommand, ActivateCycleHandler, ActivateCycleResult, ChangePhaseCommand,
    ChangePhaseHandler, ChangePhaseResult, CloseCycleCommand, CloseCycleHandler,
    CloseCycleResult, CycleCommandError, PhaseChangeMode, StartEqualizationCommand,
    StartEqualizationHandler,
};
pub use dashboard::{
    DeadlineOverviewReport, GetDeadlineOverviewHandler, GetDeadlineOverviewQuery, PlanReport,
};
pub use pdi::{
    ActionStatusUpdate, ChangePdiStatusCommand, ChangePdiStatusHandler, ChangePdiStatusResult,
    DeletePdiCommand, DeletePdiHandler, PdiCommandError, UpdateActionStatusCommand,
    UpdateActionStatusHandler, UpdateActionStatusResult,
};

use crate::domain::foundation::{
    CommandMetadata, DomainError, EventEnvelope, SerializableDomainEvent,
};
use crate::ports::EventPublisher;

/// Wraps an event for publishing, copying the command's tracing context.
pub(crate) fn envelope_for<E: SerializableDomainEvent>(
    event: &E,
    metadata: &CommandMetadata,
    correlation_id: &str,
) -> Result<EventEnvelope, DomainError> {
    let mut envelope = event
        .to_envelope()?
        .with_correlation_id(correlation_id)
        .with_user_id(metadata.user_id.to_string());
    if let Some(trace_id) = metadata.trace_id() {
        envelope = envelope.with_trace_id(trace_id);
    }
    Ok(envelope)
}

/// Publishes the events of an already persisted change.
pub(crate) async fn publish_committed(publisher: &dyn EventPublisher, envelopes: Vec<EventEnvelope>) {
    let event_types: Vec<String> = envelopes.iter().map(|e| e.event_type.clone()).collect();
    if let Err(e) = publisher.publish_all(envelopes).await {
        tracing::error!(
            event_types = ?event_types,
            error = %e,
            "Event publishing failed after the change was persisted"
        );
    }
}
