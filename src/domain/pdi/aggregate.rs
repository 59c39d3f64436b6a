//! DevelopmentPlan aggregate.
//!
//! A plan exclusively owns its actions. Every mutator first checks that the
//! plan is not archived; the only way out of ARCHIVED is
//! [`DevelopmentPlan::reactivate`] (or the equivalent
//! `change_status(IN_PROGRESS)`).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ActionId, LifecycleError, PdiId, StateMachine, Timestamp, UserId, ValidationError,
};

use super::{ActionDraft, ActionStatus, ActionStatusChange, PdiAction, PdiStatus};

/// Editable header fields of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetails {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<Timestamp>,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
}

/// Individual development plan (PDI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentPlan {
    pub id: PdiId,
    pub owner_id: UserId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<Timestamp>,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub status: PdiStatus,
    #[serde(default)]
    pub actions: Vec<PdiAction>,
}

impl DevelopmentPlan {
    /// Creates a NOT_STARTED plan without actions.
    pub fn new(owner_id: UserId, title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(Self {
            id: PdiId::new(),
            owner_id,
            title,
            description: None,
            start_date: None,
            end_date: None,
            status: PdiStatus::NotStarted,
            actions: Vec::new(),
        })
    }

    /// Builder: sets the plan window.
    pub fn with_window(mut self, start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn is_archived(&self) -> bool {
        self.status.is_archived()
    }

    pub fn action(&self, action_id: ActionId) -> Option<&PdiAction> {
        self.actions.iter().find(|a| a.id == action_id)
    }

    /// Returns `ArchivedImmutable` when the plan is archived.
    pub fn ensure_mutable(&self) -> Result<(), LifecycleError> {
        if self.is_archived() {
            return Err(LifecycleError::ArchivedImmutable { pdi_id: self.id });
        }
        Ok(())
    }

    /// Guard run before the plan is deleted. Archived plans cannot be deleted.
    pub fn ensure_deletable(&self) -> Result<(), LifecycleError> {
        self.ensure_mutable()
    }

    // ───────────────────────────────────────────────────────────────
    // Status
    // ───────────────────────────────────────────────────────────────

    /// Moves the plan along its transition table and returns the previous
    /// status.
    ///
    /// From ARCHIVED only IN_PROGRESS is accepted; any other target is
    /// `ArchivedImmutable`.
    pub fn change_status(&mut self, target: PdiStatus) -> Result<PdiStatus, LifecycleError> {
        if self.is_archived() && target != PdiStatus::InProgress {
            return Err(LifecycleError::ArchivedImmutable { pdi_id: self.id });
        }
        let previous = self.status;
        self.status = self.status.transition_to(target)?;
        Ok(previous)
    }

    /// Returns an archived plan to IN_PROGRESS.
    pub fn reactivate(&mut self) -> Result<(), LifecycleError> {
        if !self.is_archived() {
            return Err(LifecycleError::precondition(format!(
                "only {} plans can be reactivated; plan {} is {}",
                PdiStatus::Archived,
                self.id,
                self.status
            )));
        }
        self.change_status(PdiStatus::InProgress)?;
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Details and actions
    // ───────────────────────────────────────────────────────────────

    pub fn update_details(&mut self, details: PlanDetails) -> Result<(), LifecycleError> {
        self.ensure_mutable()?;
        if details.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }
        self.title = details.title;
        self.description = details.description;
        self.start_date = details.start_date;
        self.end_date = details.end_date;
        Ok(())
    }

    pub fn add_action(&mut self, draft: ActionDraft) -> Result<ActionId, LifecycleError> {
        self.ensure_mutable()?;
        let action = PdiAction::from_draft(draft)?;
        let id = action.id;
        self.actions.push(action);
        Ok(id)
    }

    pub fn update_action(
        &mut self,
        action_id: ActionId,
        draft: ActionDraft,
    ) -> Result<(), LifecycleError> {
        self.ensure_mutable()?;
        draft.validate()?;
        self.action_mut(action_id)?.apply_draft(draft)?;
        Ok(())
    }

    pub fn remove_action(&mut self, action_id: ActionId) -> Result<PdiAction, LifecycleError> {
        self.ensure_mutable()?;
        let index = self
            .actions
            .iter()
            .position(|a| a.id == action_id)
            .ok_or(LifecycleError::ActionNotFound {
                pdi_id: self.id,
                action_id,
            })?;
        Ok(self.actions.remove(index))
    }

    /// Toggles one action through `TO_DO -> IN_PROGRESS -> COMPLETED -> TO_DO`.
    pub fn toggle_action_status(
        &mut self,
        action_id: ActionId,
        now: Timestamp,
    ) -> Result<ActionStatusChange, LifecycleError> {
        self.ensure_mutable()?;
        self.action_mut(action_id)?.toggle_status(now)
    }

    /// Sets one action to any status.
    pub fn set_action_status(
        &mut self,
        action_id: ActionId,
        status: ActionStatus,
        now: Timestamp,
    ) -> Result<ActionStatusChange, LifecycleError> {
        self.ensure_mutable()?;
        Ok(self.action_mut(action_id)?.set_status(status, now))
    }

    pub fn completed_actions(&self) -> usize {
        self.actions.iter().filter(|a| a.status.is_completed()).count()
    }

    fn action_mut(&mut self, action_id: ActionId) -> Result<&mut PdiAction, LifecycleError> {
        let pdi_id = self.id;
        self.actions
            .iter_mut()
            .find(|a| a.id == action_id)
            .ok_or(LifecycleError::ActionNotFound { pdi_id, action_id })
    }
}
