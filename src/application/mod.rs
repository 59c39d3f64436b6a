//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change cycles and plans; the query handler builds the
//! deadline dashboard.

pub mod handlers;

pub use handlers::{
    // Cycle commands
    ActivateCycleCommand, ActivateCycleHandler, ActivateCycleResult,
    ChangePhaseCommand, ChangePhaseHandler, ChangePhaseResult, PhaseChangeMode,
    CloseCycleCommand, CloseCycleHandler, CloseCycleResult,
    StartEqualizationCommand, StartEqualizationHandler,
    CycleCommandError,
    // Plan commands
    ChangePdiStatusCommand, ChangePdiStatusHandler, ChangePdiStatusResult,
    UpdateActionStatusCommand, UpdateActionStatusHandler, UpdateActionStatusResult,
    ActionStatusUpdate,
    DeletePdiCommand, DeletePdiHandler,
    PdiCommandError,
    // Dashboard queries
    DeadlineOverviewReport, GetDeadlineOverviewHandler, GetDeadlineOverviewQuery, PlanReport,
};
