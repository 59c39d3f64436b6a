//! DeletePdiHandler - removes a plan that is not archived.

use std::sync::Arc;

use crate::application::handlers::{envelope_for, publish_committed};
use crate::domain::foundation::{CommandMetadata, EventId, PdiId};
use crate::domain::pdi::PdiDeleted;
use crate::ports::{Clock, EventPublisher, PdiRepository};

use super::PdiCommandError;

#[derive(Debug, Clone)]
pub struct DeletePdiCommand {
    pub pdi_id: PdiId,
}

pub struct DeletePdiHandler {
    pdi_repository: Arc<dyn PdiRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl DeletePdiHandler {
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

    /// Deletes the plan and returns the published event.
    pub async fn handle(
        &self,
        cmd: DeletePdiCommand,
        metadata: CommandMetadata,
    ) -> Result<PdiDeleted, PdiCommandError> {
        let plan = self
            .pdi_repository
            .find_by_id(&cmd.pdi_id)
            .await?
            .ok_or(PdiCommandError::PdiNotFound(cmd.pdi_id))?;

        plan.ensure_deletable()?;

        let event = PdiDeleted {
            event_id: EventId::new(),
            pdi_id: plan.id,
            owner_id: plan.owner_id.clone(),
            title: plan.title.clone(),
            deleted_by: metadata.user_id.clone(),
            deleted_at: self.clock.now(),
        };
        let envelope = envelope_for(&event, &metadata, &metadata.correlation_id())?;

        self.pdi_repository.delete(&plan.id).await?;
        publish_committed(&*self.event_publisher, vec![envelope]).await;

        tracing::info!(pdi_id = %plan.id, user_id = %metadata.user_id, "Development plan deleted");
        Ok(event)
    }
}
