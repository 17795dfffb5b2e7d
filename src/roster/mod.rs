//! Roster computations.
//!
//! Everything here is request-scoped: grids, open-shift counts and cost
//! rollups are built from data fetched for the call and dropped afterwards.
//!
//! - [`filter`]: date ranges and venue/work-area/employee narrowing
//! - [`grid`]: employee × date placement
//! - [`open_shifts`]: unassigned shifts per date
//! - [`cost`]: labour cost and the Financial Summary
//! - [`repeat`]: forward-fill planning

pub mod cost;
pub mod filter;
pub mod grid;
pub mod open_shifts;
pub mod repeat;

pub use cost::{RateBook, financial_summary, hourly_equivalent_rate, rollup, shift_cost};
pub use filter::{DateRange, RosterFilter, WEEK_DAYS};
pub use grid::{
    CellStatus, GridCell, GridRow, RosterGrid, RosterGridView, RowHeader, conflict_error,
    find_conflict,
};
pub use open_shifts::OpenShiftReport;
pub use repeat::{RepeatOutcome, clamp_weeks, plan_repeat_dates, repeat_draft};
