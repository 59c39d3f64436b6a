//! Error types for the domain layer.
//!
//! - [`ValidationError`] - value object construction failures
//! - [`LifecycleError`] - rejected lifecycle operations (typed, engine-level)
//! - [`DomainError`] - code + message envelope shared with ports and handlers

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

use super::{ActionId, CycleId, PdiId};

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Rejection of a lifecycle operation.
///
/// Every mutating engine operation either succeeds completely or returns one
/// of these and leaves the record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The requested state change is not in the entity's transition table.
    #[error("Cannot transition {entity} from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    /// Mutation attempted on an archived development plan.
    #[error("Development plan {pdi_id} is archived and cannot be modified")]
    ArchivedImmutable { pdi_id: PdiId },

    /// Activation, close or phase change attempted on a closed cycle.
    #[error("Cycle {cycle_id} is already closed")]
    AlreadyClosed { cycle_id: CycleId },

    /// A guard other than the transition table rejected the operation.
    #[error("Precondition failed: {reason}")]
    PreconditionFailed { reason: String },

    /// The referenced action does not belong to the plan.
    #[error("Action {action_id} not found in development plan {pdi_id}")]
    ActionNotFound { pdi_id: PdiId, action_id: ActionId },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl LifecycleError {
    pub fn invalid_transition(
        entity: &'static str,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        LifecycleError::InvalidTransition {
            entity,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn precondition(reason: impl Into<String>) -> Self {
        LifecycleError::PreconditionFailed {
            reason: reason.into(),
        }
    }

    /// Returns the error code for this rejection.
    pub fn code(&self) -> ErrorCode {
        match self {
            LifecycleError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            LifecycleError::ArchivedImmutable { .. } => ErrorCode::ArchivedImmutable,
            LifecycleError::AlreadyClosed { .. } => ErrorCode::AlreadyClosed,
            LifecycleError::PreconditionFailed { .. } => ErrorCode::PreconditionFailed,
            LifecycleError::ActionNotFound { .. } => ErrorCode::ActionNotFound,
            LifecycleError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    CycleNotFound,
    PdiNotFound,
    ActionNotFound,

    // Lifecycle errors
    InvalidTransition,
    ArchivedImmutable,
    AlreadyClosed,
    MultipleOpenCyclesDetected,
    PreconditionFailed,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::CycleNotFound => "CYCLE_NOT_FOUND",
            ErrorCode::PdiNotFound => "PDI_NOT_FOUND",
            ErrorCode::ActionNotFound => "ACTION_NOT_FOUND",
            ErrorCode::InvalidTransition => "INVALID_TRANSITION",
            ErrorCode::ArchivedImmutable => "ARCHIVED_IMMUTABLE",
            ErrorCode::AlreadyClosed => "ALREADY_CLOSED",
            ErrorCode::MultipleOpenCyclesDetected => "MULTIPLE_OPEN_CYCLES_DETECTED",
            ErrorCode::PreconditionFailed => "PRECONDITION_FAILED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<LifecycleError> for DomainError {
    fn from(err: LifecycleError) -> Self {
        let base = DomainError::new(err.code(), err.to_string());
        match err {
            LifecycleError::InvalidTransition { entity, from, to } => base
                .with_detail("entity", entity)
                .with_detail("from", from)
                .with_detail("to", to),
            LifecycleError::ArchivedImmutable { pdi_id } => {
                base.with_detail("pdi_id", pdi_id.to_string())
            }
            LifecycleError::AlreadyClosed { cycle_id } => {
                base.with_detail("cycle_id", cycle_id.to_string())
            }
            LifecycleError::ActionNotFound { pdi_id, action_id } => base
                .with_detail("pdi_id", pdi_id.to_string())
                .with_detail("action_id", action_id.to_string()),
            LifecycleError::PreconditionFailed { .. } | LifecycleError::Validation(_) => base,
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::new(ErrorCode::InternalError, format!("Serialization failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("title");
        assert_eq!(format!("{}", err), "Field 'title' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("duration", 1, 3650, 0);
        assert_eq!(
            format!("{}", err),
            "Field 'duration' must be between 1 and 3650, got 0"
        );
    }

    #[test]
    fn invalid_transition_displays_both_states() {
        let err = LifecycleError::invalid_transition("cycle phase", "ASSESSMENTS", "EQUALIZATION");
        assert_eq!(
            err.to_string(),
            "Cannot transition cycle phase from ASSESSMENTS to EQUALIZATION"
        );
    }

    #[test]
    fn lifecycle_error_maps_to_matching_code() {
        let cycle_id = CycleId::new();
        let pdi_id = PdiId::new();
        assert_eq!(
            LifecycleError::AlreadyClosed { cycle_id }.code(),
            ErrorCode::AlreadyClosed
        );
        assert_eq!(
            LifecycleError::ArchivedImmutable { pdi_id }.code(),
            ErrorCode::ArchivedImmutable
        );
        assert_eq!(
            LifecycleError::precondition("x").code(),
            ErrorCode::PreconditionFailed
        );
        assert_eq!(
            LifecycleError::from(ValidationError::empty_field("title")).code(),
            ErrorCode::ValidationFailed
        );
    }

    #[test]
    fn domain_error_from_lifecycle_error_keeps_details() {
        let pdi_id = PdiId::new();
        let err: DomainError = LifecycleError::ArchivedImmutable { pdi_id }.into();

        assert_eq!(err.code, ErrorCode::ArchivedImmutable);
        assert_eq!(err.details.get("pdi_id"), Some(&pdi_id.to_string()));
        assert!(err.message.contains("archived"));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::CycleNotFound, "Cycle not found");
        assert_eq!(format!("{}", err), "[CYCLE_NOT_FOUND] Cycle not found");
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(
            format!("{}", ErrorCode::MultipleOpenCyclesDetected),
            "MULTIPLE_OPEN_CYCLES_DETECTED"
        );
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
