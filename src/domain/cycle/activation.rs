//! Cycle activation protocol.
//!
//! Opening a cycle closes whichever cycle was open before it, so at most one
//! cycle is OPEN system-wide. The function works on copies and returns every
//! changed record; the caller persists them together and must serialize
//! concurrent activations (the engine cannot lock remote storage).

use serde::Serialize;

use crate::domain::foundation::{CycleId, LifecycleError, StateMachine};

use super::{CyclePhase, CycleStatus, EvaluationCycle};

/// Convenience policy applied while activating a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationPolicy {
    /// Derive a missing `end_date` from `start_date + default_duration_days`.
    pub auto_set_end_date: bool,
    pub default_duration_days: i64,
}

impl Default for ActivationPolicy {
    fn default() -> Self {
        Self {
            auto_set_end_date: false,
            default_duration_days: 90,
        }
    }
}

/// Recoverable data-consistency findings reported by activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivationWarning {
    /// More than one other cycle was OPEN before activation. All of them
    /// were closed.
    MultipleOpenCyclesDetected { closed: Vec<CycleId> },
}

/// Records changed by a successful activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationOutcome {
    /// The newly opened cycle.
    pub activated: EvaluationCycle,
    /// Previously open cycles, now CLOSED. Usually zero or one.
    pub closed: Vec<EvaluationCycle>,
    pub warnings: Vec<ActivationWarning>,
}

impl ActivationOutcome {
    /// Every record the caller must persist, activated cycle first.
    pub fn changed_cycles(&self) -> Vec<EvaluationCycle> {
        std::iter::once(self.activated.clone())
            .chain(self.closed.iter().cloned())
            .collect()
    }

    pub fn closed_ids(&self) -> Vec<CycleId> {
        self.closed.iter().map(|c| c.id).collect()
    }
}

/// Opens `cycle` and closes every other OPEN cycle in `all_cycles`.
///
/// # Errors
///
/// - `AlreadyClosed` if `cycle` is CLOSED
/// - `PreconditionFailed` if `cycle` is OPEN or in EQUALIZATION, or the
///   derived end date is out of range
pub fn activate(
    cycle: &EvaluationCycle,
    all_cycles: &[EvaluationCycle],
    policy: &ActivationPolicy,
) -> Result<ActivationOutcome, LifecycleError> {
    match cycle.status {
        CycleStatus::Upcoming => {}
        CycleStatus::Closed => return Err(LifecycleError::AlreadyClosed { cycle_id: cycle.id }),
        other => {
            return Err(LifecycleError::precondition(format!(
                "only {} cycles can be activated; cycle {} is {}",
                CycleStatus::Upcoming,
                cycle.id,
                other
            )))
        }
    }

    let mut activated = cycle.clone();
    activated.status = activated.status.transition_to(CycleStatus::Open)?;
    activated.phase = CyclePhase::Assessments;
    if policy.auto_set_end_date && activated.end_date.is_none() {
        if let Some(start) = activated.start_date {
            let end = start
                .checked_add_days(policy.default_duration_days)
                .ok_or_else(|| {
                    LifecycleError::precondition(format!(
                        "default duration of {} days overflows the end date of cycle {}",
                        policy.default_duration_days, cycle.id
                    ))
                })?;
            activated.end_date = Some(end);
        }
    }

    let mut closed = Vec::new();
    for other in all_cycles
        .iter()
        .filter(|c| c.id != cycle.id && c.status == CycleStatus::Open)
    {
        let mut demoted = other.clone();
        demoted.status = demoted.status.transition_to(CycleStatus::Closed)?;
        closed.push(demoted);
    }

    let mut warnings = Vec::new();
    if closed.len() > 1 {
        let ids: Vec<CycleId> = closed.iter().map(|c| c.id).collect();
        tracing::warn!(
            cycle_id = %cycle.id,
            open_cycles = closed.len(),
            "Multiple open cycles detected during activation; closing all of them"
        );
        warnings.push(ActivationWarning::MultipleOpenCyclesDetected { closed: ids });
    }

    tracing::debug!(
        cycle_id = %activated.id,
        closed = closed.len(),
        "Cycle activation computed"
    );

    Ok(ActivationOutcome {
        activated,
        closed,
        warnings,
    })
}
