//! In-memory development plan repository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PdiId, UserId};
use crate::domain::pdi::DevelopmentPlan;
use crate::ports::PdiRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPdiRepository {
    plans: Arc<RwLock<Vec<DevelopmentPlan>>>,
}

impl InMemoryPdiRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plans(plans: Vec<DevelopmentPlan>) -> Self {
        Self {
            plans: Arc::new(RwLock::new(plans)),
        }
    }

    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plans.read().await.is_empty()
    }
}

fn not_found(id: &PdiId) -> DomainError {
    DomainError::new(
        ErrorCode::PdiNotFound,
        format!("Development plan {} not found", id),
    )
    .with_detail("pdi_id", id.to_string())
}

#[async_trait]
impl PdiRepository for InMemoryPdiRepository {
    async fn save(&self, plan: &DevelopmentPlan) -> Result<(), DomainError> {
        let mut plans = self.plans.write().await;
        if plans.iter().any(|p| p.id == plan.id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Development plan {} already exists", plan.id),
            ));
        }
        plans.push(plan.clone());
        Ok(())
    }

    async fn update(&self, plan: &DevelopmentPlan) -> Result<(), DomainError> {
        let mut plans = self.plans.write().await;
        let slot = plans
            .iter_mut()
            .find(|p| p.id == plan.id)
            .ok_or_else(|| not_found(&plan.id))?;
        *slot = plan.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &PdiId) -> Result<Option<DevelopmentPlan>, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<DevelopmentPlan>, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans
            .iter()
            .filter(|p| p.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<DevelopmentPlan>, DomainError> {
        Ok(self.plans.read().await.clone())
    }

    async fn delete(&self, id: &PdiId) -> Result<(), DomainError> {
        let mut plans = self.plans.write().await;
        let index = plans
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| not_found(id))?;
        plans.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(owner: &str) -> DevelopmentPlan {
        DevelopmentPlan::new(UserId::new(owner).unwrap(), "Plan").unwrap()
    }

    #[tokio::test]
    async fn find_by_owner_keeps_order() {
        let first = plan("ana");
        let other = plan("bo");
        let second = plan("ana");
        let repo = InMemoryPdiRepository::with_plans(vec![
            first.clone(),
            other,
            second.clone(),
        ]);

        let owned = repo.find_by_owner(&UserId::new("ana").unwrap()).await.unwrap();

        assert_eq!(
            owned.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );
    }

    #[tokio::test]
    async fn delete_removes_plan() {
        let p = plan("ana");
        let repo = InMemoryPdiRepository::with_plans(vec![p.clone()]);

        repo.delete(&p.id).await.unwrap();

        assert!(repo.is_empty().await);
        let err = repo.delete(&p.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PdiNotFound);
    }

    #[tokio::test]
    async fn update_replaces_record() {
        let mut p = plan("ana");
        let repo = InMemoryPdiRepository::new();
        repo.save(&p).await.unwrap();

        p.title = "Renamed".to_string();
        repo.update(&p).await.unwrap();

        assert_eq!(repo.find_by_id(&p.id).await.unwrap().unwrap().title, "Renamed");
    }
}
