//! In-memory cycle repository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle::{CycleStatus, EvaluationCycle};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode};
use crate::ports::CycleRepository;

/// Cycle store backed by a vector, so listing keeps insertion order.
///
/// `update_all` holds the write lock for the whole batch, which makes it
/// atomic for every reader of this repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCycleRepository {
    cycles: Arc<RwLock<Vec<EvaluationCycle>>>,
}

impl InMemoryCycleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-filled with `cycles`.
    pub fn with_cycles(cycles: Vec<EvaluationCycle>) -> Self {
        Self {
            cycles: Arc::new(RwLock::new(cycles)),
        }
    }

    pub async fn len(&self) -> usize {
        self.cycles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cycles.read().await.is_empty()
    }
}

fn not_found(id: &CycleId) -> DomainError {
    DomainError::new(ErrorCode::CycleNotFound, format!("Cycle {} not found", id))
        .with_detail("cycle_id", id.to_string())
}

#[async_trait]
impl CycleRepository for InMemoryCycleRepository {
    async fn save(&self, cycle: &EvaluationCycle) -> Result<(), DomainError> {
        let mut cycles = self.cycles.write().await;
        if cycles.iter().any(|c| c.id == cycle.id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Cycle {} already exists", cycle.id),
            ));
        }
        cycles.push(cycle.clone());
        Ok(())
    }

    async fn update(&self, cycle: &EvaluationCycle) -> Result<(), DomainError> {
        let mut cycles = self.cycles.write().await;
        let slot = cycles
            .iter_mut()
            .find(|c| c.id == cycle.id)
            .ok_or_else(|| not_found(&cycle.id))?;
        *slot = cycle.clone();
        Ok(())
    }

    async fn update_all(&self, updated: &[EvaluationCycle]) -> Result<(), DomainError> {
        let mut cycles = self.cycles.write().await;
        if let Some(missing) = updated
            .iter()
            .find(|u| !cycles.iter().any(|c| c.id == u.id))
        {
            return Err(not_found(&missing.id));
        }
        for cycle in updated {
            if let Some(slot) = cycles.iter_mut().find(|c| c.id == cycle.id) {
                *slot = cycle.clone();
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<EvaluationCycle>, DomainError> {
        let cycles = self.cycles.read().await;
        Ok(cycles.iter().find(|c| c.id == *id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<EvaluationCycle>, DomainError> {
        Ok(self.cycles.read().await.clone())
    }

    async fn find_open(&self) -> Result<Vec<EvaluationCycle>, DomainError> {
        let cycles = self.cycles.read().await;
        Ok(cycles
            .iter()
            .filter(|c| c.status == CycleStatus::Open)
            .cloned()
            .collect())
    }
}
