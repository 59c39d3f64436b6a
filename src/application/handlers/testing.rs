//! Mock ports shared by handler tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::cycle::{CycleStatus, EvaluationCycle};
use crate::domain::foundation::{
    CycleId, DomainError, ErrorCode, EventEnvelope, PdiId, Timestamp, UserId,
};
use crate::domain::pdi::DevelopmentPlan;
use crate::ports::{Clock, CycleRepository, EventPublisher, PdiRepository};

pub fn now() -> Timestamp {
    Timestamp::parse_rfc3339("2024-06-10T12:00:00Z").unwrap()
}

pub struct StaticClock;

impl Clock for StaticClock {
    fn now(&self) -> Timestamp {
        now()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Cycles
// ─────────────────────────────────────────────────────────────────────

pub struct MockCycleRepository {
    cycles: Mutex<Vec<EvaluationCycle>>,
    fail_update: bool,
}

impl MockCycleRepository {
    pub fn with(cycles: Vec<EvaluationCycle>) -> Self {
        Self {
            cycles: Mutex::new(cycles),
            fail_update: false,
        }
    }

    pub fn failing_updates(cycles: Vec<EvaluationCycle>) -> Self {
        Self {
            cycles: Mutex::new(cycles),
            fail_update: true,
        }
    }

    pub fn get(&self, id: CycleId) -> EvaluationCycle {
        self.cycles
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .unwrap()
    }
}

#[async_trait]
impl CycleRepository for MockCycleRepository {
    async fn save(&self, cycle: &EvaluationCycle) -> Result<(), DomainError> {
        self.cycles.lock().unwrap().push(cycle.clone());
        Ok(())
    }

    async fn update(&self, cycle: &EvaluationCycle) -> Result<(), DomainError> {
        self.update_all(std::slice::from_ref(cycle)).await
    }

    async fn update_all(&self, updated: &[EvaluationCycle]) -> Result<(), DomainError> {
        if self.fail_update {
            return Err(DomainError::new(ErrorCode::DatabaseError, "write failed"));
        }
        let mut cycles = self.cycles.lock().unwrap();
        for cycle in updated {
            let slot = cycles
                .iter_mut()
                .find(|c| c.id == cycle.id)
                .ok_or_else(|| DomainError::new(ErrorCode::CycleNotFound, "missing"))?;
            *slot = cycle.clone();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<EvaluationCycle>, DomainError> {
        Ok(self.cycles.lock().unwrap().iter().find(|c| c.id == *id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<EvaluationCycle>, DomainError> {
        Ok(self.cycles.lock().unwrap().clone())
    }

    async fn find_open(&self) -> Result<Vec<EvaluationCycle>, DomainError> {
        Ok(self
            .cycles
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.status == CycleStatus::Open)
            .cloned()
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Plans
// ─────────────────────────────────────────────────────────────────────

pub struct MockPdiRepository {
    plans: Mutex<Vec<DevelopmentPlan>>,
}

impl MockPdiRepository {
    pub fn with(plans: Vec<DevelopmentPlan>) -> Self {
        Self {
            plans: Mutex::new(plans),
        }
    }

    pub fn get(&self, id: PdiId) -> Option<DevelopmentPlan> {
        self.plans.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }
}

#[async_trait]
impl PdiRepository for MockPdiRepository {
    async fn save(&self, plan: &DevelopmentPlan) -> Result<(), DomainError> {
        self.plans.lock().unwrap().push(plan.clone());
        Ok(())
    }

    async fn update(&self, plan: &DevelopmentPlan) -> Result<(), DomainError> {
        let mut plans = self.plans.lock().unwrap();
        let slot = plans
            .iter_mut()
            .find(|p| p.id == plan.id)
            .ok_or_else(|| DomainError::new(ErrorCode::PdiNotFound, "missing"))?;
        *slot = plan.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &PdiId) -> Result<Option<DevelopmentPlan>, DomainError> {
        Ok(self.get(*id))
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<DevelopmentPlan>, DomainError> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<DevelopmentPlan>, DomainError> {
        Ok(self.plans.lock().unwrap().clone())
    }

    async fn delete(&self, id: &PdiId) -> Result<(), DomainError> {
        self.plans.lock().unwrap().retain(|p| p.id != *id);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockEventPublisher {
    published: Mutex<Vec<EventEnvelope>>,
    fail_on: Option<String>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every event but reports a failure for `event_type`.
    pub fn failing_on(event_type: &str) -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail_on: Some(event_type.to_string()),
        }
    }

    fn check(&self, event: &EventEnvelope) -> Result<(), DomainError> {
        match &self.fail_on {
            Some(t) if *t == event.event_type => Err(DomainError::new(
                ErrorCode::InternalError,
                format!("subscriber rejected {}", t),
            )),
            _ => Ok(()),
        }
    }

    pub fn event_types(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }

    pub fn published(&self) -> Vec<EventEnvelope> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let outcome = self.check(&event);
        self.published.lock().unwrap().push(event);
        outcome
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        let mut outcome = Ok(());
        for event in events {
            if let Err(e) = self.publish(event).await {
                outcome = Err(e);
            }
        }
        outcome
    }
}
