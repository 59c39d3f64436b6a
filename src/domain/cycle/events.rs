//! Evaluation cycle domain events.
//!
//! - `CycleActivated` - a cycle was opened (and any previous open cycle closed)
//! - `CycleClosed` - a cycle reached CLOSED, explicitly or by being superseded
//! - `CyclePhaseChanged` - the phase moved, through the validated path or forced
//! - `CycleEqualizationStarted` - status moved OPEN -> EQUALIZATION

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, CycleId, EventId, Timestamp, UserId};

use super::CyclePhase;

// ════════════════════════════════════════════════════════════════════════════
// CycleActivated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a cycle becomes the open cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleActivated {
    pub event_id: EventId,

    pub cycle_id: CycleId,

    pub cycle_name: String,

    /// Cycles closed to keep a single open cycle.
    pub superseded_cycle_ids: Vec<CycleId>,

    pub activated_by: UserId,

    pub activated_at: Timestamp,
}

domain_event!(
    CycleActivated,
    event_type = "cycle.activated.v1",
    aggregate_id = cycle_id,
    aggregate_type = "EvaluationCycle",
    occurred_at = activated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// CycleClosed
// ════════════════════════════════════════════════════════════════════════════

/// Why a cycle was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CloseReason {
    /// An administrator closed it.
    Explicit,
    /// Another cycle was activated.
    Superseded { by: CycleId },
}

/// Published when a cycle reaches CLOSED.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleClosed {
    pub event_id: EventId,

    pub cycle_id: CycleId,

    pub cycle_name: String,

    pub reason: CloseReason,

    pub closed_by: UserId,

    pub closed_at: Timestamp,
}

domain_event!(
    CycleClosed,
    event_type = "cycle.closed.v1",
    aggregate_id = cycle_id,
    aggregate_type = "EvaluationCycle",
    occurred_at = closed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// CyclePhaseChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published when the phase of a running cycle changes.
///
/// `forced` marks administrative overrides that bypassed the transition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclePhaseChanged {
    pub event_id: EventId,

    pub cycle_id: CycleId,

    pub from: CyclePhase,

    pub to: CyclePhase,

    pub forced: bool,

    pub changed_by: UserId,

    pub changed_at: Timestamp,
}

domain_event!(
    CyclePhaseChanged,
    event_type = "cycle.phase_changed.v1",
    aggregate_id = cycle_id,
    aggregate_type = "EvaluationCycle",
    occurred_at = changed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// CycleEqualizationStarted
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleEqualizationStarted {
    pub event_id: EventId,

    pub cycle_id: CycleId,

    pub started_by: UserId,

    pub started_at: Timestamp,
}

domain_event!(
    CycleEqualizationStarted,
    event_type = "cycle.equalization_started.v1",
    aggregate_id = cycle_id,
    aggregate_type = "EvaluationCycle",
    occurred_at = started_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    fn user() -> UserId {
        UserId::new("hr-admin").unwrap()
    }

    #[test]
    fn phase_changed_reports_event_identity() {
        let cycle_id = CycleId::new();
        let event = CyclePhaseChanged {
            event_id: EventId::new(),
            cycle_id,
            from: CyclePhase::Assessments,
            to: CyclePhase::ManagerReviews,
            forced: false,
            changed_by: user(),
            changed_at: Timestamp::now(),
        };

        assert_eq!(event.event_type(), "cycle.phase_changed.v1");
        assert_eq!(event.aggregate_type(), "EvaluationCycle");
        assert_eq!(event.aggregate_id(), cycle_id.to_string());
    }

    #[test]
    fn closed_event_envelope_carries_reason() {
        let superseding = CycleId::new();
        let event = CycleClosed {
            event_id: EventId::new(),
            cycle_id: CycleId::new(),
            cycle_name: "2024 H1".to_string(),
            reason: CloseReason::Superseded { by: superseding },
            closed_by: user(),
            closed_at: Timestamp::now(),
        };

        let envelope = event.to_envelope().unwrap();

        assert_eq!(envelope.event_type, "cycle.closed.v1");
        assert_eq!(envelope.payload["reason"]["type"], "superseded");
        let back: CycleClosed = envelope.payload_as().unwrap();
        assert_eq!(back, event);
    }
}
