//! Core data models for the Liquidated Damages Engine.
//!
//! This module contains the bill inputs and the computation result types.

mod bill;
mod computation_result;
mod schedule;

pub use bill::{Bill, ProgressRecord, WorkOrder};
pub use computation_result::{AuditStep, ComputationResult, LdOutcome, Quarter};
pub use schedule::ScheduleWindow;
