//! GetDeadlineOverviewHandler - deadline figures for the running cycle and
//! active development plans.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::cycle::{summarize_deadlines, CycleDeadlineSummary, CycleStatus, EvaluationCycle};
use crate::domain::dashboard::{aggregate, DeadlineOverview, HasDeadlines};
use crate::domain::deadline::DeadlineClassifier;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::pdi::{compute_progress, PdiDeadlineInfo, PdiProgress};
use crate::ports::{Clock, CycleRepository, PdiRepository};

/// Query for the deadline overview.
#[derive(Debug, Clone, Default)]
pub struct GetDeadlineOverviewQuery {
    /// Restrict plans to one owner. `None` includes every plan.
    pub owner_id: Option<UserId>,
    /// Reference instant. Defaults to the clock.
    pub as_of: Option<Timestamp>,
}

/// One active plan with its derived figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    #[serde(flatten)]
    pub info: PdiDeadlineInfo,
    pub progress: PdiProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineOverviewReport {
    pub generated_at: Timestamp,
    /// Summary of the running cycle, if any.
    pub cycle: Option<CycleDeadlineSummary>,
    pub plans: Vec<PlanReport>,
    pub overview: DeadlineOverview,
}

/// Handler for the deadline overview.
///
/// The running cycle is the OPEN one; when none is open, a cycle in
/// EQUALIZATION is reported instead. Archived plans are left out.
pub struct GetDeadlineOverviewHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    pdi_repository: Arc<dyn PdiRepository>,
    clock: Arc<dyn Clock>,
    classifier: DeadlineClassifier,
}

impl GetDeadlineOverviewHandler {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        pdi_repository: Arc<dyn PdiRepository>,
        clock: Arc<dyn Clock>,
        classifier: DeadlineClassifier,
    ) -> Self {
        Self {
            cycle_repository,
            pdi_repository,
            clock,
            classifier,
        }
    }

    pub async fn handle(
        &self,
        query: GetDeadlineOverviewQuery,
    ) -> Result<DeadlineOverviewReport, DomainError> {
        let now = query.as_of.unwrap_or_else(|| self.clock.now());

        let cycles = self.cycle_repository.find_all().await?;
        let cycle = running_cycle(&cycles).map(|c| summarize_deadlines(c, now, &self.classifier));

        let plans = match &query.owner_id {
            Some(owner) => self.pdi_repository.find_by_owner(owner).await?,
            None => self.pdi_repository.find_all().await?,
        };
        let plans: Vec<PlanReport> = plans
            .iter()
            .filter(|p| !p.is_archived())
            .map(|p| PlanReport {
                info: PdiDeadlineInfo::build(p, now, &self.classifier),
                progress: compute_progress(p),
            })
            .collect();

        let mut sources: Vec<&dyn HasDeadlines> = Vec::with_capacity(plans.len() + 1);
        if let Some(summary) = &cycle {
            sources.push(summary);
        }
        sources.extend(plans.iter().map(|p| &p.info as &dyn HasDeadlines));
        let overview = aggregate(&sources);

        tracing::info!(
            plans = plans.len(),
            urgent = overview.urgent_count,
            overdue = overview.overdue_count,
            "Deadline overview generated"
        );

        Ok(DeadlineOverviewReport {
            generated_at: now,
            cycle,
            plans,
            overview,
        })
    }
}

fn running_cycle(cycles: &[EvaluationCycle]) -> Option<&EvaluationCycle> {
    let open: Vec<&EvaluationCycle> = cycles
        .iter()
        .filter(|c| c.status == CycleStatus::Open)
        .collect();
    if open.len() > 1 {
        tracing::warn!(
            open_cycles = open.len(),
            "Multiple open cycles detected; reporting the first one"
        );
    }
    open.first()
        .copied()
        .or_else(|| cycles.iter().find(|c| c.status == CycleStatus::Equalization))
}
