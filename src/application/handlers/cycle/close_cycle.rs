//! CloseCycleHandler - irreversibly closes a running cycle.

use std::sync::Arc;

use crate::application::handlers::{envelope_for, publish_committed};
use crate::domain::cycle::{CloseReason, CycleClosed, EvaluationCycle};
use crate::domain::foundation::{CommandMetadata, CycleId, EventId};
use crate::ports::{Clock, CycleRepository, EventPublisher};

use super::CycleCommandError;

#[derive(Debug, Clone)]
pub struct CloseCycleCommand {
    pub cycle_id: CycleId,
}

#[derive(Debug, Clone)]
pub struct CloseCycleResult {
    pub cycle: EvaluationCycle,
    pub event: CycleClosed,
}

pub struct CloseCycleHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CloseCycleHandler {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cycle_repository,
            event_publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CloseCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<CloseCycleResult, CycleCommandError> {
        let mut cycle = self
            .cycle_repository
            .find_by_id(&cmd.cycle_id)
            .await?
            .ok_or(CycleCommandError::CycleNotFound(cmd.cycle_id))?;

        cycle.close()?;
        let event = CycleClosed {
            event_id: EventId::new(),
            cycle_id: cycle.id,
            cycle_name: cycle.name.clone(),
            reason: CloseReason::Explicit,
            closed_by: metadata.user_id.clone(),
            closed_at: self.clock.now(),
        };
        let envelope = envelope_for(&event, &metadata, &metadata.correlation_id())?;

        self.cycle_repository.update(&cycle).await?;
        publish_committed(&*self.event_publisher, vec![envelope]).await;

        tracing::info!(cycle_id = %cycle.id, user_id = %metadata.user_id, "Cycle closed");

        Ok(CloseCycleResult { cycle, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{
        MockCycleRepository, MockEventPublisher, StaticClock,
    };
    use crate::domain::cycle::CycleStatus;
    use crate::domain::foundation::{ErrorCode, LifecycleError};

    fn cycle_with(status: CycleStatus) -> EvaluationCycle {
        let mut c = EvaluationCycle::new("2024").unwrap();
        c.status = status;
        c
    }

    fn setup(cycle: &EvaluationCycle) -> (CloseCycleHandler, Arc<MockCycleRepository>, Arc<MockEventPublisher>) {
        let repo = Arc::new(MockCycleRepository::with(vec![cycle.clone()]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = CloseCycleHandler::new(repo.clone(), publisher.clone(), Arc::new(StaticClock));
        (handler, repo, publisher)
    }

    #[tokio::test]
    async fn closes_equalization_cycle() {
        let cycle = cycle_with(CycleStatus::Equalization);
        let (handler, repo, publisher) = setup(&cycle);

        let result = handler
            .handle(CloseCycleCommand { cycle_id: cycle.id }, CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.event.reason, CloseReason::Explicit);
        assert_eq!(repo.get(cycle.id).status, CycleStatus::Closed);
        assert_eq!(publisher.event_types(), vec!["cycle.closed.v1"]);
    }

    #[tokio::test]
    async fn closing_twice_is_already_closed() {
        let cycle = cycle_with(CycleStatus::Closed);
        let (handler, _, publisher) = setup(&cycle);

        let err = handler
            .handle(CloseCycleCommand { cycle_id: cycle.id }, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CycleCommandError::Rejected(LifecycleError::AlreadyClosed { .. })
        ));
        assert_eq!(err.code(), ErrorCode::AlreadyClosed);
        assert!(publisher.event_types().is_empty());
    }
}
