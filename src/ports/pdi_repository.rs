//! Development plan repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PdiId, UserId};
use crate::domain::pdi::DevelopmentPlan;

/// Repository port for development plans (with their actions).
#[async_trait]
pub trait PdiRepository: Send + Sync {
    async fn save(&self, plan: &DevelopmentPlan) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `PdiNotFound` if the plan doesn't exist
    async fn update(&self, plan: &DevelopmentPlan) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PdiId) -> Result<Option<DevelopmentPlan>, DomainError>;

    /// Plans owned by one user, in insertion order.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<DevelopmentPlan>, DomainError>;

    async fn find_all(&self) -> Result<Vec<DevelopmentPlan>, DomainError>;

    /// Remove a plan. The archive guard is checked by the caller.
    ///
    /// # Errors
    ///
    /// - `PdiNotFound` if the plan doesn't exist
    async fn delete(&self, id: &PdiId) -> Result<(), DomainError>;
}
