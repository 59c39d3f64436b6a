//! ActivateCycleHandler - opens a cycle and closes the previously open one.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::cycle::{
    activate, ActivationPolicy, ActivationWarning, CloseReason, CycleActivated, CycleClosed,
    EvaluationCycle,
};
use crate::domain::foundation::{CommandMetadata, CycleId, EventId};
use crate::ports::{Clock, CycleRepository, EventPublisher};

use crate::application::handlers::{envelope_for, publish_committed};
use super::CycleCommandError;

#[derive(Debug, Clone)]
pub struct ActivateCycleCommand {
    pub cycle_id: CycleId,
}

#[derive(Debug, Clone)]
pub struct ActivateCycleResult {
    pub activated: EvaluationCycle,
    /// Cycles closed because they were open.
    pub closed: Vec<EvaluationCycle>,
    pub warnings: Vec<ActivationWarning>,
}

/// Handler for cycle activation.
///
/// Activations are serialized through an internal lock: the read of all
/// cycles and the write of the changed ones happen with no other activation
/// in between, which keeps a single OPEN cycle in storage.
pub struct ActivateCycleHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    policy: ActivationPolicy,
    activation_lock: Mutex<()>,
}

impl ActivateCycleHandler {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        policy: ActivationPolicy,
    ) -> Self {
        Self {
            cycle_repository,
            event_publisher,
            clock,
            policy,
            activation_lock: Mutex::new(()),
        }
    }

    pub async fn handle(
        &self,
        cmd: ActivateCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<ActivateCycleResult, CycleCommandError> {
        let _guard = self.activation_lock.lock().await;

        // 1. Load target and the full candidate set
        let cycle = self
            .cycle_repository
            .find_by_id(&cmd.cycle_id)
            .await?
            .ok_or(CycleCommandError::CycleNotFound(cmd.cycle_id))?;
        let all_cycles = self.cycle_repository.find_all().await?;

        // 2. Validate and compute every change
        let outcome = activate(&cycle, &all_cycles, &self.policy)?;

        // 3. Prepare events: closures first, then the activation
        let now = self.clock.now();
        let correlation_id = metadata.correlation_id();
        let mut envelopes = Vec::with_capacity(outcome.closed.len() + 1);
        for closed in &outcome.closed {
            let event = CycleClosed {
                event_id: EventId::new(),
                cycle_id: closed.id,
                cycle_name: closed.name.clone(),
                reason: CloseReason::Superseded {
                    by: outcome.activated.id,
                },
                closed_by: metadata.user_id.clone(),
                closed_at: now,
            };
            envelopes.push(envelope_for(&event, &metadata, &correlation_id)?);
        }
        let activated_event = CycleActivated {
            event_id: EventId::new(),
            cycle_id: outcome.activated.id,
            cycle_name: outcome.activated.name.clone(),
            superseded_cycle_ids: outcome.closed_ids(),
            activated_by: metadata.user_id.clone(),
            activated_at: now,
        };
        envelopes.push(envelope_for(&activated_event, &metadata, &correlation_id)?);

        // 4. Persist activated and closed cycles together, then publish
        self.cycle_repository
            .update_all(&outcome.changed_cycles())
            .await?;
        publish_committed(&*self.event_publisher, envelopes).await;

        tracing::info!(
            cycle_id = %outcome.activated.id,
            closed = outcome.closed.len(),
            user_id = %metadata.user_id,
            "Cycle activated"
        );

        Ok(ActivateCycleResult {
            activated: outcome.activated,
            closed: outcome.closed,
            warnings: outcome.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{
        MockCycleRepository, MockEventPublisher, StaticClock,
    };
    use crate::domain::cycle::{CyclePhase, CycleStatus};
    use crate::domain::foundation::{ErrorCode, LifecycleError};

    fn cycle(name: &str, status: CycleStatus, phase: CyclePhase) -> EvaluationCycle {
        let mut c = EvaluationCycle::new(name).unwrap();
        c.status = status;
        c.phase = phase;
        c
    }

    fn handler(
        repo: Arc<MockCycleRepository>,
        publisher: Arc<MockEventPublisher>,
    ) -> ActivateCycleHandler {
        ActivateCycleHandler::new(repo, publisher, Arc::new(StaticClock), ActivationPolicy::default())
    }

    #[tokio::test]
    async fn activation_persists_both_cycles_and_publishes() {
        let a = cycle("A", CycleStatus::Open, CyclePhase::ManagerReviews);
        let b = cycle("B", CycleStatus::Upcoming, CyclePhase::Assessments);
        let repo = Arc::new(MockCycleRepository::with(vec![a.clone(), b.clone()]));
        let publisher = Arc::new(MockEventPublisher::new());

        let result = handler(repo.clone(), publisher.clone())
            .handle(ActivateCycleCommand { cycle_id: b.id }, CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.activated.status, CycleStatus::Open);
        assert_eq!(repo.get(a.id).status, CycleStatus::Closed);
        assert_eq!(repo.get(a.id).phase, CyclePhase::ManagerReviews);
        assert_eq!(repo.get(b.id).status, CycleStatus::Open);
        assert_eq!(
            publisher.event_types(),
            vec!["cycle.closed.v1", "cycle.activated.v1"]
        );
        let published = publisher.published();
        assert_eq!(
            published[1].metadata.correlation_id.as_deref(),
            Some("test-correlation-id")
        );
        assert_eq!(published[1].metadata.user_id.as_deref(), Some("hr-admin"));
    }

    #[tokio::test]
    async fn unknown_cycle_is_not_found() {
        let repo = Arc::new(MockCycleRepository::with(vec![]));
        let publisher = Arc::new(MockEventPublisher::new());
        let id = CycleId::new();

        let err = handler(repo, publisher)
            .handle(ActivateCycleCommand { cycle_id: id }, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::CycleNotFound);
    }

    #[tokio::test]
    async fn rejected_activation_writes_and_publishes_nothing() {
        let closed = cycle("Old", CycleStatus::Closed, CyclePhase::Equalization);
        let repo = Arc::new(MockCycleRepository::with(vec![closed.clone()]));
        let publisher = Arc::new(MockEventPublisher::new());

        let err = handler(repo.clone(), publisher.clone())
            .handle(
                ActivateCycleCommand {
                    cycle_id: closed.id,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CycleCommandError::Rejected(LifecycleError::AlreadyClosed { .. })
        ));
        assert_eq!(repo.get(closed.id), closed);
        assert!(publisher.event_types().is_empty());
    }

    #[tokio::test]
    async fn failed_persistence_publishes_nothing() {
        let b = cycle("B", CycleStatus::Upcoming, CyclePhase::Assessments);
        let repo = Arc::new(MockCycleRepository::failing_updates(vec![b.clone()]));
        let publisher = Arc::new(MockEventPublisher::new());

        let err = handler(repo, publisher.clone())
            .handle(ActivateCycleCommand { cycle_id: b.id }, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert!(publisher.event_types().is_empty());
    }

    #[tokio::test]
    async fn inconsistent_data_yields_warning() {
        let a = cycle("A", CycleStatus::Open, CyclePhase::Assessments);
        let c = cycle("C", CycleStatus::Open, CyclePhase::Assessments);
        let b = cycle("B", CycleStatus::Upcoming, CyclePhase::Assessments);
        let repo = Arc::new(MockCycleRepository::with(vec![a, c, b.clone()]));
        let publisher = Arc::new(MockEventPublisher::new());

        let result = handler(repo, publisher.clone())
            .handle(ActivateCycleCommand { cycle_id: b.id }, CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.closed.len(), 2);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(publisher.event_types().len(), 3);
    }

    #[tokio::test]
    async fn subscriber_failure_does_not_undo_committed_activation() {
        let a = cycle("A", CycleStatus::Open, CyclePhase::Assessments);
        let b = cycle("B", CycleStatus::Upcoming, CyclePhase::Assessments);
        let repo = Arc::new(MockCycleRepository::with(vec![a.clone(), b.clone()]));
        let publisher = Arc::new(MockEventPublisher::failing_on("cycle.closed.v1"));

        let result = handler(repo.clone(), publisher.clone())
            .handle(ActivateCycleCommand { cycle_id: b.id }, CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.activated.id, b.id);
        assert_eq!(repo.get(b.id).status, CycleStatus::Open);
        assert_eq!(repo.get(a.id).status, CycleStatus::Closed);
        assert_eq!(
            publisher.event_types(),
            vec!["cycle.closed.v1", "cycle.activated.v1"]
        );
    }
}
