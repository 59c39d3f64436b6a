//! Cycle module - organization-wide evaluation cycles.
//!
//! A cycle has a coarse status (`UPCOMING -> OPEN -> EQUALIZATION -> CLOSED`)
//! and, while running, a phase that gates which assessments are accepted.
//! Activation keeps at most one cycle OPEN system-wide.

mod activation;
mod aggregate;
mod deadlines;
mod events;
mod phase;
mod status;

pub use activation::{activate, ActivationOutcome, ActivationPolicy, ActivationWarning};
pub use aggregate::EvaluationCycle;
pub use deadlines::{summarize_deadlines, CycleDeadlineKind, CycleDeadlineSummary};
pub use events::{
    CloseReason, CycleActivated, CycleClosed, CycleEqualizationStarted, CyclePhaseChanged,
};
pub use phase::CyclePhase;
pub use status::CycleStatus;
