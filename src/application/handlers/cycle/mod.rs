//! Evaluation cycle command handlers.

mod activate_cycle;
mod change_phase;
mod close_cycle;
mod start_equalization;

pub use activate_cycle::{ActivateCycleCommand, ActivateCycleHandler, ActivateCycleResult};
pub use change_phase::{ChangePhaseCommand, ChangePhaseHandler, ChangePhaseResult, PhaseChangeMode};
pub use close_cycle::{CloseCycleCommand, CloseCycleHandler, CloseCycleResult};
pub use start_equalization::{StartEqualizationCommand, StartEqualizationHandler};

use crate::domain::foundation::{CycleId, DomainError, ErrorCode, LifecycleError};

/// Error returned by cycle command handlers.
#[derive(Debug, Clone)]
pub enum CycleCommandError {
    /// No cycle with this ID.
    CycleNotFound(CycleId),
    /// The domain rejected the transition; nothing was written.
    Rejected(LifecycleError),
    /// Port failure.
    Domain(DomainError),
}

impl CycleCommandError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CycleCommandError::CycleNotFound(_) => ErrorCode::CycleNotFound,
            CycleCommandError::Rejected(err) => err.code(),
            CycleCommandError::Domain(err) => err.code,
        }
    }
}

impl std::fmt::Display for CycleCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleCommandError::CycleNotFound(id) => write!(f, "Cycle not found: {}", id),
            CycleCommandError::Rejected(err) => write!(f, "{}", err),
            CycleCommandError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CycleCommandError {}

impl From<DomainError> for CycleCommandError {
    fn from(err: DomainError) -> Self {
        CycleCommandError::Domain(err)
    }
}

impl From<LifecycleError> for CycleCommandError {
    fn from(err: LifecycleError) -> Self {
        CycleCommandError::Rejected(err)
    }
}
