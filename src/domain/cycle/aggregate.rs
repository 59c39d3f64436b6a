//! EvaluationCycle aggregate - the organization-wide, time-boxed review period.
//!
//! The cycle couples two orthogonal state machines: the coarse
//! [`CycleStatus`] and the fine-grained [`CyclePhase`]. All guarded mutators
//! validate first and only then write, so a rejected operation leaves the
//! record exactly as it was.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CycleId, LifecycleError, StateMachine, Timestamp, ValidationError,
};

use super::{CycleDeadlineKind, CyclePhase, CycleStatus};

/// Evaluation cycle record.
///
/// # Invariants
///
/// - At most one cycle system-wide has `status == OPEN` (maintained by
///   [`super::activate`]).
/// - `phase` never moves backwards through [`EvaluationCycle::advance_phase`].
/// - Nothing changes once `status == CLOSED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationCycle {
    pub id: CycleId,

    /// Display name, unique per organization (not enforced here).
    pub name: String,

    #[serde(default)]
    pub status: CycleStatus,

    /// Meaningful only while the cycle is running.
    #[serde(default)]
    pub phase: CyclePhase,

    #[serde(default)]
    pub start_date: Option<Timestamp>,

    #[serde(default)]
    pub end_date: Option<Timestamp>,

    #[serde(default)]
    pub assessment_deadline: Option<Timestamp>,

    #[serde(default)]
    pub manager_deadline: Option<Timestamp>,

    #[serde(default)]
    pub equalization_deadline: Option<Timestamp>,
}

impl EvaluationCycle {
    /// Creates an UPCOMING cycle in the ASSESSMENTS phase with no dates.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id: CycleId::new(),
            name,
            status: CycleStatus::Upcoming,
            phase: CyclePhase::Assessments,
            start_date: None,
            end_date: None,
            assessment_deadline: None,
            manager_deadline: None,
            equalization_deadline: None,
        })
    }

    /// Builder: sets the cycle window.
    pub fn with_window(mut self, start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Builder: sets the deadline of one phase.
    pub fn with_phase_deadline(mut self, phase: CyclePhase, deadline: Timestamp) -> Self {
        match phase {
            CyclePhase::Assessments => self.assessment_deadline = Some(deadline),
            CyclePhase::ManagerReviews => self.manager_deadline = Some(deadline),
            CyclePhase::Equalization => self.equalization_deadline = Some(deadline),
        }
        self
    }

    pub fn is_open(&self) -> bool {
        self.status == CycleStatus::Open
    }

    /// Deadline attached to a phase.
    pub fn phase_deadline(&self, phase: CyclePhase) -> Option<Timestamp> {
        match phase {
            CyclePhase::Assessments => self.assessment_deadline,
            CyclePhase::ManagerReviews => self.manager_deadline,
            CyclePhase::Equalization => self.equalization_deadline,
        }
    }

    /// Deadline of the phase currently in progress; `None` unless running.
    pub fn current_phase_deadline(&self) -> Option<Timestamp> {
        if self.status.is_running() {
            self.phase_deadline(self.phase)
        } else {
            None
        }
    }

    /// The date tracked under a summary deadline kind.
    pub fn deadline_for(&self, kind: CycleDeadlineKind) -> Option<Timestamp> {
        match kind {
            CycleDeadlineKind::Assessment => self.assessment_deadline,
            CycleDeadlineKind::ManagerReview => self.manager_deadline,
            CycleDeadlineKind::Equalization => self.equalization_deadline,
            CycleDeadlineKind::CycleEnd => self.end_date,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Phase transitions
    // ───────────────────────────────────────────────────────────────

    /// Moves to the next phase.
    ///
    /// Only `ASSESSMENTS -> MANAGER_REVIEWS` and
    /// `MANAGER_REVIEWS -> EQUALIZATION` are accepted; no-ops and
    /// regressions are `InvalidTransition`.
    pub fn advance_phase(&mut self, target: CyclePhase) -> Result<(), LifecycleError> {
        self.ensure_not_closed()?;
        if !self.status.is_running() {
            return Err(LifecycleError::precondition(format!(
                "cycle {} is {}; phases only change while it is running",
                self.id, self.status
            )));
        }
        self.phase = self.phase.transition_to(target)?;
        Ok(())
    }

    /// Administrative override: sets any phase, bypassing the transition
    /// table. Still refused on a closed cycle.
    pub fn force_phase(&mut self, phase: CyclePhase) -> Result<(), LifecycleError> {
        self.ensure_not_closed()?;
        self.phase = phase;
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Status transitions
    // ───────────────────────────────────────────────────────────────

    /// Moves status `OPEN -> EQUALIZATION` once the equalization phase began.
    pub fn start_equalization(&mut self) -> Result<(), LifecycleError> {
        self.ensure_not_closed()?;
        if self.phase != CyclePhase::Equalization {
            return Err(LifecycleError::precondition(format!(
                "cycle {} must reach the {} phase before equalization starts (current phase {})",
                self.id,
                CyclePhase::Equalization,
                self.phase
            )));
        }
        self.status = self.status.transition_to(CycleStatus::Equalization)?;
        Ok(())
    }

    /// Irreversibly closes the cycle. Phase is left as it was.
    pub fn close(&mut self) -> Result<(), LifecycleError> {
        self.ensure_not_closed()?;
        self.status = self.status.transition_to(CycleStatus::Closed)?;
        Ok(())
    }

    pub(super) fn ensure_not_closed(&self) -> Result<(), LifecycleError> {
        if self.status.is_closed() {
            return Err(LifecycleError::AlreadyClosed { cycle_id: self.id });
        }
        Ok(())
    }
}
