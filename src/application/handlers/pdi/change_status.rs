//! ChangePdiStatusHandler - moves a plan along its status table.

use std::sync::Arc;

use crate::application::handlers::{envelope_for, publish_committed};
use crate::domain::foundation::{CommandMetadata, EventId, PdiId};
use crate::domain::pdi::{DevelopmentPlan, PdiStatus, PdiStatusChanged};
use crate::ports::{Clock, EventPublisher, PdiRepository};

use super::PdiCommandError;

#[derive(Debug, Clone)]
pub struct ChangePdiStatusCommand {
    pub pdi_id: PdiId,
    pub target: PdiStatus,
}

#[derive(Debug, Clone)]
pub struct ChangePdiStatusResult {
    pub plan: DevelopmentPlan,
    pub previous: PdiStatus,
}

pub struct ChangePdiStatusHandler {
    pdi_repository: Arc<dyn PdiRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl ChangePdiStatusHandler {
    pub fn new(
        pdi_repository: Arc<dyn PdiRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pdi_repository,
            event_publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: ChangePdiStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<ChangePdiStatusResult, PdiCommandError> {
        let mut plan = self
            .pdi_repository
            .find_by_id(&cmd.pdi_id)
            .await?
            .ok_or(PdiCommandError::PdiNotFound(cmd.pdi_id))?;

        let previous = plan.change_status(cmd.target)?;

        let event = PdiStatusChanged {
            event_id: EventId::new(),
            pdi_id: plan.id,
            owner_id: plan.owner_id.clone(),
            from: previous,
            to: plan.status,
            changed_by: metadata.user_id.clone(),
            changed_at: self.clock.now(),
        };
        let envelope = envelope_for(&event, &metadata, &metadata.correlation_id())?;

        self.pdi_repository.update(&plan).await?;
        publish_committed(&*self.event_publisher, vec![envelope]).await;

        tracing::info!(
            pdi_id = %plan.id,
            from = %previous,
            to = %plan.status,
            "Development plan status changed"
        );

        Ok(ChangePdiStatusResult { plan, previous })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{
        MockEventPublisher, MockPdiRepository, StaticClock,
    };
    use crate::domain::foundation::{ErrorCode, LifecycleError, UserId};

    fn plan_in(status: PdiStatus) -> DevelopmentPlan {
        let mut plan = DevelopmentPlan::new(UserId::new("ana").unwrap(), "Lead").unwrap();
        plan.status = status;
        plan
    }

    fn setup(plan: &DevelopmentPlan) -> (ChangePdiStatusHandler, Arc<MockPdiRepository>, Arc<MockEventPublisher>) {
        let repo = Arc::new(MockPdiRepository::with(vec![plan.clone()]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler =
            ChangePdiStatusHandler::new(repo.clone(), publisher.clone(), Arc::new(StaticClock));
        (handler, repo, publisher)
    }

    #[tokio::test]
    async fn starts_a_plan() {
        let plan = plan_in(PdiStatus::NotStarted);
        let (handler, repo, publisher) = setup(&plan);

        let result = handler
            .handle(
                ChangePdiStatusCommand {
                    pdi_id: plan.id,
                    target: PdiStatus::InProgress,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(result.previous, PdiStatus::NotStarted);
        assert_eq!(repo.get(plan.id).unwrap().status, PdiStatus::InProgress);
        assert_eq!(publisher.event_types(), vec!["pdi.status_changed.v1"]);
    }

    #[tokio::test]
    async fn reactivates_archived_plan() {
        let plan = plan_in(PdiStatus::Archived);
        let (handler, repo, _) = setup(&plan);

        handler
            .handle(
                ChangePdiStatusCommand {
                    pdi_id: plan.id,
                    target: PdiStatus::InProgress,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(repo.get(plan.id).unwrap().status, PdiStatus::InProgress);
    }

    #[tokio::test]
    async fn archived_plan_rejects_other_targets() {
        let plan = plan_in(PdiStatus::Archived);
        let (handler, repo, publisher) = setup(&plan);

        let err = handler
            .handle(
                ChangePdiStatusCommand {
                    pdi_id: plan.id,
                    target: PdiStatus::Completed,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PdiCommandError::Rejected(LifecycleError::ArchivedImmutable { .. })
        ));
        assert_eq!(repo.get(plan.id).unwrap(), plan);
        assert!(publisher.event_types().is_empty());
    }

    #[tokio::test]
    async fn missing_plan_is_not_found() {
        let (handler, _, _) = setup(&plan_in(PdiStatus::NotStarted));

        let err = handler
            .handle(
                ChangePdiStatusCommand {
                    pdi_id: PdiId::new(),
                    target: PdiStatus::InProgress,
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::PdiNotFound);
    }

    #[tokio::test]
    async fn publisher_failure_keeps_committed_status() {
        let plan = plan_in(PdiStatus::NotStarted);
        let repo = Arc::new(MockPdiRepository::with(vec![plan.clone()]));
        let publisher = Arc::new(MockEventPublisher::failing_on("pdi.status_changed.v1"));
        let handler =
            ChangePdiStatusHandler::new(repo.clone(), publisher.clone(), Arc::new(StaticClock));

        let result = handler
            .handle(
                ChangePdiStatusCommand {
                    pdi_id: plan.id,
                    target: PdiStatus::InProgress,
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(repo.get(plan.id).unwrap().status, PdiStatus::InProgress);
        assert_eq!(publisher.event_types(), vec!["pdi.status_changed.v1"]);
    }
}
