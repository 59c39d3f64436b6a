//! StartEqualizationHandler - moves an open cycle into EQUALIZATION status.

use std::sync::Arc;

use crate::application::handlers::{envelope_for, publish_committed};
use crate::domain::cycle::{CycleEqualizationStarted, EvaluationCycle};
use crate::domain::foundation::{CommandMetadata, CycleId, EventId};
use crate::ports::{Clock, CycleRepository, EventPublisher};

use super::CycleCommandError;

#[derive(Debug, Clone)]
pub struct StartEqualizationCommand {
    pub cycle_id: CycleId,
}

pub struct StartEqualizationHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl StartEqualizationHandler {
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
        cmd: StartEqualizationCommand,
        metadata: CommandMetadata,
    ) -> Result<EvaluationCycle, CycleCommandError> {
        let mut cycle = self
            .cycle_repository
            .find_by_id(&cmd.cycle_id)
            .await?
            .ok_or(CycleCommandError::CycleNotFound(cmd.cycle_id))?;

        cycle.start_equalization()?;
        let event = CycleEqualizationStarted {
            event_id: EventId::new(),
            cycle_id: cycle.id,
            started_by: metadata.user_id.clone(),
            started_at: self.clock.now(),
        };
        let envelope = envelope_for(&event, &metadata, &metadata.correlation_id())?;

        self.cycle_repository.update(&cycle).await?;
        publish_committed(&*self.event_publisher, vec![envelope]).await;

        tracing::info!(cycle_id = %cycle.id, "Cycle equalization started");
        Ok(cycle)
    }
}
