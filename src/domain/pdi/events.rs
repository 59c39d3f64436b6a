//! Development plan domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, ActionId, EventId, PdiId, Timestamp, UserId};

use super::{ActionStatus, PdiStatus};

/// Published when a plan changes status (including reactivation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdiStatusChanged {
    pub event_id: EventId,
    pub pdi_id: PdiId,
    pub owner_id: UserId,
    pub from: PdiStatus,
    pub to: PdiStatus,
    pub changed_by: UserId,
    pub changed_at: Timestamp,
}

domain_event!(
    PdiStatusChanged,
    event_type = "pdi.status_changed.v1",
    aggregate_id = pdi_id,
    aggregate_type = "DevelopmentPlan",
    occurred_at = changed_at,
    event_id = event_id
);

/// Published when one action of a plan changes status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdiActionStatusChanged {
    pub event_id: EventId,
    pub pdi_id: PdiId,
    pub action_id: ActionId,
    pub action_title: String,
    pub from: ActionStatus,
    pub to: ActionStatus,
    /// Set when `to` is COMPLETED.
    pub completed_at: Option<Timestamp>,
    pub changed_by: UserId,
    pub changed_at: Timestamp,
}

domain_event!(
    PdiActionStatusChanged,
    event_type = "pdi.action_status_changed.v1",
    aggregate_id = pdi_id,
    aggregate_type = "DevelopmentPlan",
    occurred_at = changed_at,
    event_id = event_id
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdiDeleted {
    pub event_id: EventId,
    pub pdi_id: PdiId,
    pub owner_id: UserId,
    pub title: String,
    pub deleted_by: UserId,
    pub deleted_at: Timestamp,
}

domain_event!(
    PdiDeleted,
    event_type = "pdi.deleted.v1",
    aggregate_id = pdi_id,
    aggregate_type = "DevelopmentPlan",
    occurred_at = deleted_at,
    event_id = event_id
);
