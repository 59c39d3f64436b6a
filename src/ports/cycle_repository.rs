//! Cycle repository port.
//!
//! Persists evaluation cycle records. The engine hands back every record a
//! transition changed; this port stores them.

use async_trait::async_trait;

use crate::domain::cycle::EvaluationCycle;
use crate::domain::foundation::{CycleId, DomainError};

/// Repository port for evaluation cycles.
///
/// Implementations must make [`CycleRepository::update_all`] all-or-nothing
/// so an activation never persists the opened cycle without the cycles it
/// closed.
#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Save a new cycle.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, cycle: &EvaluationCycle) -> Result<(), DomainError>;

    /// Update an existing cycle.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if the cycle doesn't exist
    async fn update(&self, cycle: &EvaluationCycle) -> Result<(), DomainError>;

    /// Update several cycles in one step.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if any cycle doesn't exist; nothing is written
    async fn update_all(&self, cycles: &[EvaluationCycle]) -> Result<(), DomainError>;

    /// Find a cycle by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &CycleId) -> Result<Option<EvaluationCycle>, DomainError>;

    /// All cycles, in insertion order.
    async fn find_all(&self) -> Result<Vec<EvaluationCycle>, DomainError>;

    /// Cycles with status OPEN. More than one means the data is inconsistent.
    async fn find_open(&self) -> Result<Vec<EvaluationCycle>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn CycleRepository) {}
}
