//! Development plan command handlers.

mod change_status;
mod delete_pdi;
mod update_action_status;

pub use change_status::{ChangePdiStatusCommand, ChangePdiStatusHandler, ChangePdiStatusResult};
pub use delete_pdi::{DeletePdiCommand, DeletePdiHandler};
pub use update_action_status::{
    ActionStatusUpdate, UpdateActionStatusCommand, UpdateActionStatusHandler,
    UpdateActionStatusResult,
};

use crate::domain::foundation::{DomainError, ErrorCode, LifecycleError, PdiId};

/// Error returned by plan command handlers.
#[derive(Debug, Clone)]
pub enum PdiCommandError {
    PdiNotFound(PdiId),
    /// The domain rejected the change; nothing was written.
    Rejected(LifecycleError),
    Domain(DomainError),
}

impl PdiCommandError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PdiCommandError::PdiNotFound(_) => ErrorCode::PdiNotFound,
            PdiCommandError::Rejected(err) => err.code(),
            PdiCommandError::Domain(err) => err.code,
        }
    }
}

impl std::fmt::Display for PdiCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdiCommandError::PdiNotFound(id) => write!(f, "Development plan not found: {}", id),
            PdiCommandError::Rejected(err) => write!(f, "{}", err),
            PdiCommandError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PdiCommandError {}

impl From<DomainError> for PdiCommandError {
    fn from(err: DomainError) -> Self {
        PdiCommandError::Domain(err)
    }
}

impl From<LifecycleError> for PdiCommandError {
    fn from(err: LifecycleError) -> Self {
        PdiCommandError::Rejected(err)
    }
}
