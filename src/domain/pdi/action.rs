//! PDI actions - the child items a development plan tracks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ActionId, LifecycleError, Timestamp, ValidationError};

/// Status of a single action.
///
/// Toggling cycles `TO_DO -> IN_PROGRESS -> COMPLETED -> TO_DO`. `BLOCKED`
/// sits outside that cycle and is only entered or left through an explicit
/// set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    #[default]
    ToDo,
    InProgress,
    Completed,
    Blocked,
}

impl ActionStatus {
    pub const ALL: [ActionStatus; 4] = [
        ActionStatus::ToDo,
        ActionStatus::InProgress,
        ActionStatus::Completed,
        ActionStatus::Blocked,
    ];

    /// Next status in the toggle cycle; `None` for `BLOCKED`.
    pub fn toggled(&self) -> Option<ActionStatus> {
        match self {
            ActionStatus::ToDo => Some(ActionStatus::InProgress),
            ActionStatus::InProgress => Some(ActionStatus::Completed),
            ActionStatus::Completed => Some(ActionStatus::ToDo),
            ActionStatus::Blocked => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ActionStatus::Completed)
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionStatus::ToDo => "TO_DO",
            ActionStatus::InProgress => "IN_PROGRESS",
            ActionStatus::Completed => "COMPLETED",
            ActionStatus::Blocked => "BLOCKED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl fmt::Display for ActionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionPriority::Low => "LOW",
            ActionPriority::Medium => "MEDIUM",
            ActionPriority::High => "HIGH",
            ActionPriority::Critical => "CRITICAL",
        };
        write!(f, "{}", s)
    }
}

/// Before/after pair returned by status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionStatusChange {
    pub action_id: ActionId,
    pub from: ActionStatus,
    pub to: ActionStatus,
}

/// Editable fields of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<Timestamp>,
    #[serde(default)]
    pub priority: ActionPriority,
}

impl ActionDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            deadline: None,
            priority: ActionPriority::default(),
        }
    }

    pub fn with_deadline(mut self, deadline: Timestamp) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_priority(mut self, priority: ActionPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(())
    }
}

/// One action of a development plan.
///
/// `completed_at` is present exactly while `status == COMPLETED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdiAction {
    pub id: ActionId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<Timestamp>,
    #[serde(default)]
    pub priority: ActionPriority,
    #[serde(default)]
    pub status: ActionStatus,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

impl PdiAction {
    /// Creates a TO_DO action from a validated draft.
    pub fn from_draft(draft: ActionDraft) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id: ActionId::new(),
            title: draft.title,
            description: draft.description,
            deadline: draft.deadline,
            priority: draft.priority,
            status: ActionStatus::ToDo,
            completed_at: None,
        })
    }

    /// Replaces the editable fields, keeping id, status and completion stamp.
    pub fn apply_draft(&mut self, draft: ActionDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.title = draft.title;
        self.description = draft.description;
        self.deadline = draft.deadline;
        self.priority = draft.priority;
        Ok(())
    }

    /// Moves to the next status of the toggle cycle.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when the action is BLOCKED.
    pub fn toggle_status(&mut self, now: Timestamp) -> Result<ActionStatusChange, LifecycleError> {
        let next = self.status.toggled().ok_or_else(|| {
            LifecycleError::invalid_transition(
                "action status",
                self.status.to_string(),
                "toggle (BLOCKED only changes through an explicit set)",
            )
        })?;
        Ok(self.set_status(next, now))
    }

    /// Sets any status directly.
    pub fn set_status(&mut self, status: ActionStatus, now: Timestamp) -> ActionStatusChange {
        let from = self.status;
        if status.is_completed() {
            if !from.is_completed() {
                self.completed_at = Some(now);
            }
        } else {
            self.completed_at = None;
        }
        self.status = status;
        ActionStatusChange {
            action_id: self.id,
            from,
            to: status,
        }
    }

    /// Past its deadline and not completed. No deadline means never overdue.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        match self.deadline {
            Some(deadline) => deadline.is_before(&now) && !self.status.is_completed(),
            None => false,
        }
    }
}
