//! Labour cost result models.
//!
//! This module contains the per-shift [`ShiftCost`] line, the [`CostRollup`]
//! aggregate and the [`FinancialSummary`] returned to callers. None of these are
//! persisted; they exist only as query results.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a cost line is backed by an assigned employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    /// Cost of an assigned shift at the employee's own rate.
    Confirmed,
    /// Forecast cost of an open shift at an average rate.
    Estimated,
}

/// Where the hourly rate on a cost line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// The assigned employee's pay rate.
    Employee,
    /// The work area's historical average rate.
    WorkAreaAverage,
    /// The average rate across the venue's employees.
    VenueAverage,
    /// No rate could be found; the line costs zero.
    Unavailable,
}

/// Cost of a single shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCost {
    /// The costed shift.
    pub shift_id: Uuid,
    /// The assigned employee, `None` for open shifts.
    pub employee_id: Option<String>,
    /// The shift date.
    pub date: NaiveDate,
    /// Unrounded paid hours.
    pub hours: Decimal,
    /// Hourly-equivalent rate applied.
    pub rate: Decimal,
    /// Where the rate came from.
    pub rate_source: RateSource,
    /// `hours * rate`, unrounded.
    pub amount: Decimal,
    /// Confirmed or estimated.
    pub kind: CostKind,
    /// Whether the shift is published.
    pub published: bool,
}

/// Labour cost for one date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCost {
    /// Paid hours rostered that day, rounded to one decimal place.
    pub hours: Decimal,
    /// Cost of assigned shifts.
    pub confirmed: Decimal,
    /// Estimated cost of open shifts.
    pub estimated: Decimal,
}

/// Labour cost as a percentage of forecast revenue.
///
/// `Undefined` is a normal result, returned when no usable forecast exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum LabourCostPercentage {
    /// The percentage, rounded to two decimal places.
    Defined(Decimal),
    /// The forecast was missing or zero, or the ratio overflowed.
    Undefined,
}

impl LabourCostPercentage {
    /// Computes `labour_cost / forecast * 100`.
    ///
    /// A result too large for a `Decimal` is treated like a missing forecast.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::LabourCostPercentage;
    /// use rust_decimal::Decimal;
    ///
    /// let pct = LabourCostPercentage::compute(Decimal::new(2500, 0), Some(Decimal::new(10000, 0)));
    /// assert_eq!(pct, LabourCostPercentage::Defined(Decimal::new(25, 0)));
    ///
    /// let pct = LabourCostPercentage::compute(Decimal::new(2500, 0), Some(Decimal::ZERO));
    /// assert_eq!(pct, LabourCostPercentage::Undefined);
    /// ```
    pub fn compute(labour_cost: Decimal, forecast: Option<Decimal>) -> Self {
        match forecast {
            Some(forecast) if forecast > Decimal::ZERO => labour_cost
                .checked_div(forecast)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map_or(Self::Undefined, |pct| Self::Defined(pct.round_dp(2))),
            _ => Self::Undefined,
        }
    }

    /// Returns the value if defined.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Defined(value) => Some(*value),
            Self::Undefined => None,
        }
    }
}

/// Aggregated labour cost for a set of shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRollup {
    /// One line per costed shift, ordered by date.
    pub shifts: Vec<ShiftCost>,
    /// Totals per date.
    pub per_day: BTreeMap<NaiveDate, DayCost>,
    /// Confirmed cost per employee.
    pub per_employee: BTreeMap<String, Decimal>,
    /// Cost of assigned shifts.
    pub confirmed_total: Decimal,
    /// Cost of assigned, published shifts.
    pub published_total: Decimal,
    /// Cost of assigned shifts still in draft.
    pub draft_total: Decimal,
    /// Estimated cost of open shifts.
    pub estimated_total: Decimal,
    /// Confirmed plus estimated cost.
    pub weekly_total: Decimal,
    /// `weekly_total` against the venue forecast.
    pub labour_cost_percentage: LabourCostPercentage,
    /// Set when the range is not exactly seven days, so the percentage is approximate.
    pub approximate: bool,
}

/// Financial figures for a venue over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// The venue summarised.
    pub venue_id: String,
    /// First date of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last date of the range (inclusive).
    pub end_date: NaiveDate,
    /// Account balance reported by the finance system.
    pub total_balance: Option<Decimal>,
    /// Forecast revenue for the week.
    pub venue_forecast: Option<Decimal>,
    /// Published labour cost for the range.
    pub labour_cost: Decimal,
    /// Cost of assigned shifts in the range that are still in draft.
    pub draft_labour_cost: Decimal,
    /// Estimated cost of open shifts in the range.
    pub estimated_open_cost: Decimal,
    /// Published labour cost for the preceding range of equal length.
    pub prior_labour_cost: Decimal,
    /// Mean hourly-equivalent rate of the venue's employees.
    pub avg_pay_rate: Option<Decimal>,
    /// Published labour cost against forecast.
    pub labour_cost_percentage: LabourCostPercentage,
    /// Set when the range is not exactly seven days.
    pub approximate: bool,
}
