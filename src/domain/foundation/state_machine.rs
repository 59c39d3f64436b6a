//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions across the lifecycle statuses of cycles, phases and plans.

use super::LifecycleError;

/// Trait for status enums that represent state machines.
///
/// Implementors define the transition table as an exhaustive `match` and get
/// validated transitions for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for PdiStatus {
///     const ENTITY: &'static str = "pdi";
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             NotStarted => vec![InProgress],
///             InProgress => vec![Completed, Archived],
///             // ... etc
///         }
///     }
/// }
///
/// let next = PdiStatus::NotStarted.transition_to(PdiStatus::InProgress)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug + std::fmt::Display {
    /// Name of the entity the status belongs to, used in error messages.
    const ENTITY: &'static str;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, LifecycleError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(LifecycleError::invalid_transition(
                Self::ENTITY,
                self.to_string(),
                target.to_string(),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
