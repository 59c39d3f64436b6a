//! UpdateActionStatusHandler - toggles or sets the status of one action.

use std::sync::Arc;

use crate::application::handlers::{envelope_for, publish_committed};
use crate::domain::foundation::{ActionId, CommandMetadata, EventId, PdiId};
use crate::domain::pdi::{ActionStatus, ActionStatusChange, DevelopmentPlan, PdiActionStatusChanged};
use crate::ports::{Clock, EventPublisher, PdiRepository};

use super::PdiCommandError;

/// Requested change to an action's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatusUpdate {
    /// Next status of the `TO_DO -> IN_PROGRESS -> COMPLETED` cycle.
    Toggle,
    /// Any status, including BLOCKED.
    Set(ActionStatus),
}

#[derive(Debug, Clone)]
pub struct UpdateActionStatusCommand {
    pub pdi_id: PdiId,
    pub action_id: ActionId,
    pub update: ActionStatusUpdate,
}

#[derive(Debug, Clone)]
pub struct UpdateActionStatusResult {
    pub plan: DevelopmentPlan,
    pub change: ActionStatusChange,
}

pub struct UpdateActionStatusHandler {
    pdi_repository: Arc<dyn PdiRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl UpdateActionStatusHandler {
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
        cmd: UpdateActionStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateActionStatusResult, PdiCommandError> {
        let mut plan = self
            .pdi_repository
            .find_by_id(&cmd.pdi_id)
            .await?
            .ok_or(PdiCommandError::PdiNotFound(cmd.pdi_id))?;

        let now = self.clock.now();
        let change = match cmd.update {
            ActionStatusUpdate::Toggle => plan.toggle_action_status(cmd.action_id, now)?,
            ActionStatusUpdate::Set(status) => plan.set_action_status(cmd.action_id, status, now)?,
        };

        let (action_title, completed_at) = plan
            .action(change.action_id)
            .map(|a| (a.title.clone(), a.completed_at))
            .unwrap_or_default();
        let event = PdiActionStatusChanged {
            event_id: EventId::new(),
            pdi_id: plan.id,
            action_id: change.action_id,
            action_title,
            from: change.from,
            to: change.to,
            completed_at,
            changed_by: metadata.user_id.clone(),
            changed_at: now,
        };
        let envelope = envelope_for(&event, &metadata, &metadata.correlation_id())?;

        self.pdi_repository.update(&plan).await?;
        publish_committed(&*self.event_publisher, vec![envelope]).await;

        tracing::info!(
            pdi_id = %plan.id,
            action_id = %change.action_id,
            from = %change.from,
            to = %change.to,
            "Action status changed"
        );

        Ok(UpdateActionStatusResult { plan, change })
    }
}
