//! Core data models for the roster engine.
//!
//! This module contains all the domain models used throughout the engine.

mod cost_summary;
mod employee;
mod shift;
mod time_window;
mod venue;

pub use cost_summary::{
    CostKind, CostRollup, DayCost, FinancialSummary, LabourCostPercentage, RateSource, ShiftCost,
};
pub use employee::{Employee, PayRate, UNKNOWN_EMPLOYEE_NAME};
pub use shift::{ShiftDraft, ShiftRecord, ShiftState};
pub use time_window::{REST_DAY_LABEL, TimeWindow, round_hours};
pub use venue::{Venue, WorkArea};
