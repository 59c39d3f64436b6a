//! ChangePhaseHandler - validated phase advance or administrative override.

use std::sync::Arc;

use crate::application::handlers::{envelope_for, publish_committed};
use crate::domain::cycle::{CyclePhase, CyclePhaseChanged, EvaluationCycle};
use crate::domain::foundation::{CommandMetadata, CycleId, EventId};
use crate::ports::{Clock, CycleRepository, EventPublisher};

use super::CycleCommandError;

/// How the phase change is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseChangeMode {
    /// Only the next phase is accepted.
    Advance,
    /// Any phase; reserved for administrators.
    Force,
}

#[derive(Debug, Clone)]
pub struct ChangePhaseCommand {
    pub cycle_id: CycleId,
    pub target: CyclePhase,
    pub mode: PhaseChangeMode,
}

#[derive(Debug, Clone)]
pub struct ChangePhaseResult {
    pub cycle: EvaluationCycle,
    pub previous: CyclePhase,
    /// `None` when a forced change kept the same phase.
    pub event: Option<CyclePhaseChanged>,
}

pub struct ChangePhaseHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl ChangePhaseHandler {
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
        cmd: ChangePhaseCommand,
        metadata: CommandMetadata,
    ) -> Result<ChangePhaseResult, CycleCommandError> {
        let mut cycle = self
            .cycle_repository
            .find_by_id(&cmd.cycle_id)
            .await?
            .ok_or(CycleCommandError::CycleNotFound(cmd.cycle_id))?;
        let previous = cycle.phase;

        match cmd.mode {
            PhaseChangeMode::Advance => cycle.advance_phase(cmd.target)?,
            PhaseChangeMode::Force => {
                cycle.force_phase(cmd.target)?;
                tracing::warn!(
                    cycle_id = %cycle.id,
                    from = %previous,
                    to = %cmd.target,
                    user_id = %metadata.user_id,
                    "Cycle phase forced by administrator"
                );
            }
        }

        let event = if previous != cycle.phase {
            Some(CyclePhaseChanged {
                event_id: EventId::new(),
                cycle_id: cycle.id,
                from: previous,
                to: cycle.phase,
                forced: cmd.mode == PhaseChangeMode::Force,
                changed_by: metadata.user_id.clone(),
                changed_at: self.clock.now(),
            })
        } else {
            None
        };
        let envelopes = event
            .iter()
            .map(|e| envelope_for(e, &metadata, &metadata.correlation_id()))
            .collect::<Result<Vec<_>, _>>()?;

        self.cycle_repository.update(&cycle).await?;

        if !envelopes.is_empty() {
            publish_committed(&*self.event_publisher, envelopes).await;
            tracing::info!(cycle_id = %cycle.id, from = %previous, to = %cycle.phase, "Cycle phase changed");
        }

        Ok(ChangePhaseResult {
            cycle,
            previous,
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{
        MockCycleRepository, MockEventPublisher, StaticClock,
    };
    use crate::domain::cycle::CycleStatus;
    use crate::domain::foundation::LifecycleError;

    fn open_cycle(phase: CyclePhase) -> EvaluationCycle {
        let mut c = EvaluationCycle::new("2024").unwrap();
        c.status = CycleStatus::Open;
        c.phase = phase;
        c
    }

    fn setup(cycle: &EvaluationCycle) -> (ChangePhaseHandler, Arc<MockCycleRepository>, Arc<MockEventPublisher>) {
        let repo = Arc::new(MockCycleRepository::with(vec![cycle.clone()]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = ChangePhaseHandler::new(repo.clone(), publisher.clone(), Arc::new(StaticClock));
        (handler, repo, publisher)
    }

    fn command(cycle: &EvaluationCycle, target: CyclePhase, mode: PhaseChangeMode) -> ChangePhaseCommand {
        ChangePhaseCommand {
            cycle_id: cycle.id,
            target,
            mode,
        }
    }

    #[tokio::test]
    async fn advance_persists_and_publishes() {
        let cycle = open_cycle(CyclePhase::Assessments);
        let (handler, repo, publisher) = setup(&cycle);

        let result = handler
            .handle(
                command(&cycle, CyclePhase::ManagerReviews, PhaseChangeMode::Advance),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(result.previous, CyclePhase::Assessments);
        assert_eq!(repo.get(cycle.id).phase, CyclePhase::ManagerReviews);
        assert!(!result.event.unwrap().forced);
        assert_eq!(publisher.event_types(), vec!["cycle.phase_changed.v1"]);
    }

    #[tokio::test]
    async fn skipping_a_phase_is_rejected_without_side_effects() {
        let cycle = open_cycle(CyclePhase::Assessments);
        let (handler, repo, publisher) = setup(&cycle);

        let err = handler
            .handle(
                command(&cycle, CyclePhase::Equalization, PhaseChangeMode::Advance),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CycleCommandError::Rejected(LifecycleError::InvalidTransition { .. })
        ));
        assert_eq!(repo.get(cycle.id), cycle);
        assert!(publisher.event_types().is_empty());
    }

    #[tokio::test]
    async fn force_allows_regression_and_marks_event() {
        let cycle = open_cycle(CyclePhase::Equalization);
        let (handler, repo, _) = setup(&cycle);

        let result = handler
            .handle(
                command(&cycle, CyclePhase::Assessments, PhaseChangeMode::Force),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(repo.get(cycle.id).phase, CyclePhase::Assessments);
        assert!(result.event.unwrap().forced);
    }

    #[tokio::test]
    async fn forcing_same_phase_publishes_nothing() {
        let cycle = open_cycle(CyclePhase::ManagerReviews);
        let (handler, _, publisher) = setup(&cycle);

        let result = handler
            .handle(
                command(&cycle, CyclePhase::ManagerReviews, PhaseChangeMode::Force),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert!(result.event.is_none());
        assert!(publisher.event_types().is_empty());
    }
}
