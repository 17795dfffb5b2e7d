//! Labour cost aggregation.
//!
//! Costs are computed on demand from shift durations and the pay rates in the
//! employee feed. Per-shift amounts stay unrounded; totals are rounded to two
//! decimal places once, at the end of a rollup.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::config::StandardHours;
use crate::models::{
    CostKind, CostRollup, DayCost, Employee, FinancialSummary, LabourCostPercentage, PayRate,
    RateSource, ShiftCost, ShiftRecord, ShiftState, Venue, round_hours,
};

use super::filter::DateRange;

/// Weeks in a year, for per-annum rates.
pub const WEEKS_PER_YEAR: u32 = 52;

/// Weeks in a fortnight, for fortnightly rates.
pub const WEEKS_PER_FORTNIGHT: u32 = 2;

/// Converts a periodic pay rate into an hourly equivalent.
///
/// An explicit hourly rate wins. Otherwise the first populated of per-annum,
/// monthly and fortnightly is divided by the matching standard hours. Returns
/// `None` when no rate is populated or the standard hours are zero.
///
/// # Examples
///
/// ```
/// use roster_engine::config::StandardHours;
/// use roster_engine::models::PayRate;
/// use roster_engine::roster::hourly_equivalent_rate;
/// use rust_decimal::Decimal;
///
/// let pay = PayRate {
///     fortnight_rate: Some(Decimal::new(2280, 0)),
///     ..PayRate::default()
/// };
/// // 2280 / (2 * 38)
/// assert_eq!(
///     hourly_equivalent_rate(&pay, &StandardHours::default()),
///     Some(Decimal::new(30, 0))
/// );
/// ```
pub fn hourly_equivalent_rate(pay: &PayRate, hours: &StandardHours) -> Option<Decimal> {
    if let Some(hourly) = pay.hourly_rate {
        return Some(hourly);
    }

    let (amount, period_hours) = if let Some(per_annum) = pay.per_annum_rate {
        (per_annum, Decimal::from(WEEKS_PER_YEAR) * hours.weekly)
    } else if let Some(monthly) = pay.monthly_rate {
        (monthly, hours.monthly)
    } else if let Some(fortnight) = pay.fortnight_rate {
        (fortnight, Decimal::from(WEEKS_PER_FORTNIGHT) * hours.weekly)
    } else {
        return None;
    };

    if period_hours <= Decimal::ZERO {
        return None;
    }
    Some(amount / period_hours)
}

fn mean(rates: &[Decimal]) -> Option<Decimal> {
    if rates.is_empty() {
        return None;
    }
    let sum: Decimal = rates.iter().sum();
    Some(sum / Decimal::from(rates.len()))
}

/// Hourly rates resolved for one venue.
#[derive(Debug, Clone, Default)]
pub struct RateBook {
    employees: HashMap<String, Decimal>,
    work_areas: HashMap<String, Decimal>,
    venue_average: Option<Decimal>,
}

impl RateBook {
    /// Resolves rates for `venue` from its employees' pay.
    ///
    /// A work area's rate is its catalog average when present, otherwise the
    /// mean of its employees' rates. The venue average is the mean across all
    /// employees with a rate.
    pub fn build(venue: &Venue, employees: &[Employee], hours: &StandardHours) -> Self {
        let employee_rates: HashMap<String, Decimal> = employees
            .iter()
            .filter_map(|e| hourly_equivalent_rate(&e.pay_rate, hours).map(|r| (e.id.clone(), r)))
            .collect();

        let mut by_area: HashMap<&str, Vec<Decimal>> = HashMap::new();
        for employee in employees {
            let (Some(area), Some(rate)) = (
                employee.work_area_id.as_deref(),
                employee_rates.get(&employee.id),
            ) else {
                continue;
            };
            by_area.entry(area).or_default().push(*rate);
        }

        let work_areas = venue
            .work_areas
            .iter()
            .filter_map(|area| {
                let rate = area
                    .average_hourly_rate
                    .or_else(|| by_area.get(area.id.as_str()).and_then(|r| mean(r)))?;
                Some((area.id.clone(), rate))
            })
            .collect();

        let all: Vec<Decimal> = employee_rates.values().copied().collect();

        Self {
            venue_average: mean(&all),
            employees: employee_rates,
            work_areas,
        }
    }

    /// Adds or overrides one employee's rate.
    pub fn with_employee_rate(mut self, employee_id: impl Into<String>, rate: Decimal) -> Self {
        self.employees.insert(employee_id.into(), rate);
        self
    }

    /// The employee's hourly-equivalent rate.
    pub fn employee_rate(&self, employee_id: &str) -> Option<Decimal> {
        self.employees.get(employee_id).copied()
    }

    /// Mean rate across the venue's employees.
    pub fn venue_average(&self) -> Option<Decimal> {
        self.venue_average
    }

    /// Rate used to estimate an open shift in `work_area_id`.
    pub fn estimate_rate(&self, work_area_id: Option<&str>) -> (Decimal, RateSource) {
        if let Some(rate) = work_area_id.and_then(|id| self.work_areas.get(id)) {
            return (*rate, RateSource::WorkAreaAverage);
        }
        match self.venue_average {
            Some(rate) => (rate, RateSource::VenueAverage),
            None => (Decimal::ZERO, RateSource::Unavailable),
        }
    }

    /// Rate applied to `shift`: the employee's own, or an estimate for open shifts.
    pub fn rate_for(&self, shift: &ShiftRecord) -> (Decimal, RateSource) {
        match shift.employee_id.as_deref() {
            None => self.estimate_rate(shift.work_area_id.as_deref()),
            Some(employee_id) => match self.employee_rate(employee_id) {
                Some(rate) => (rate, RateSource::Employee),
                None => {
                    tracing::warn!(
                        employee_id = %employee_id,
                        shift_id = %shift.id,
                        "No pay rate for employee, costing shift at zero"
                    );
                    (Decimal::ZERO, RateSource::Unavailable)
                }
            },
        }
    }
}

/// Cost of one shift at `rate`.
///
/// Rest days and cancelled shifts cost zero. Open shifts are marked
/// [`CostKind::Estimated`].
pub fn shift_cost(shift: &ShiftRecord, rate: Decimal, rate_source: RateSource) -> ShiftCost {
    let hours = shift.net_hours();
    ShiftCost {
        shift_id: shift.id,
        employee_id: shift.employee_id.clone(),
        date: shift.date,
        hours,
        rate,
        rate_source,
        amount: hours * rate,
        kind: if shift.is_open() {
            CostKind::Estimated
        } else {
            CostKind::Confirmed
        },
        published: shift.state == ShiftState::Published,
    }
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Rolls up labour cost for the shifts in `range`.
///
/// Cancelled shifts and shifts outside the range are skipped. `per_day` has an
/// entry for every date in the range. The percentage compares confirmed plus
/// estimated cost against `forecast`.
pub fn rollup<'a, I>(
    shifts: I,
    rates: &RateBook,
    forecast: Option<Decimal>,
    range: DateRange,
) -> CostRollup
where
    I: IntoIterator<Item = &'a ShiftRecord>,
{
    let mut live: Vec<&ShiftRecord> = shifts
        .into_iter()
        .filter(|s| !s.is_cancelled() && range.contains(s.date))
        .collect();
    live.sort_by_key(|s| s.ordering_key());

    let mut per_day: BTreeMap<_, DayCost> = range
        .dates()
        .into_iter()
        .map(|date| (date, DayCost::default()))
        .collect();
    let mut per_employee: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut confirmed_total = Decimal::ZERO;
    let mut published_total = Decimal::ZERO;
    let mut draft_total = Decimal::ZERO;
    let mut estimated_total = Decimal::ZERO;

    let lines: Vec<ShiftCost> = live
        .into_iter()
        .map(|shift| {
            let (rate, source) = rates.rate_for(shift);
            let line = shift_cost(shift, rate, source);

            let day = per_day.entry(line.date).or_default();
            day.hours += line.hours;
            match line.kind {
                CostKind::Confirmed => {
                    day.confirmed += line.amount;
                    confirmed_total += line.amount;
                    if line.published {
                        published_total += line.amount;
                    } else {
                        draft_total += line.amount;
                    }
                    if let Some(employee_id) = &line.employee_id {
                        *per_employee.entry(employee_id.clone()).or_default() += line.amount;
                    }
                }
                CostKind::Estimated => {
                    day.estimated += line.amount;
                    estimated_total += line.amount;
                }
            }
            line
        })
        .collect();

    for day in per_day.values_mut() {
        day.hours = round_hours(day.hours);
        day.confirmed = round_money(day.confirmed);
        day.estimated = round_money(day.estimated);
    }
    for amount in per_employee.values_mut() {
        *amount = round_money(*amount);
    }

    let weekly_total = confirmed_total + estimated_total;

    CostRollup {
        shifts: lines,
        per_day,
        per_employee,
        confirmed_total: round_money(confirmed_total),
        published_total: round_money(published_total),
        draft_total: round_money(draft_total),
        estimated_total: round_money(estimated_total),
        weekly_total: round_money(weekly_total),
        labour_cost_percentage: LabourCostPercentage::compute(weekly_total, forecast),
        approximate: !range.is_full_week(),
    }
}

/// Assembles the Financial Summary for `venue` over `range`.
///
/// `current` and `prior` are rollups for the range and for the preceding range
/// of equal length. Only published shifts count as labour cost, and the
/// percentage compares that published cost against the forecast.
pub fn financial_summary(
    venue: &Venue,
    range: DateRange,
    current: &CostRollup,
    prior: &CostRollup,
    rates: &RateBook,
) -> FinancialSummary {
    FinancialSummary {
        venue_id: venue.id.clone(),
        start_date: range.start(),
        end_date: range.end(),
        total_balance: venue.account_balance,
        venue_forecast: venue.weekly_forecast,
        labour_cost: current.published_total,
        draft_labour_cost: current.draft_total,
        estimated_open_cost: current.estimated_total,
        prior_labour_cost: prior.published_total,
        avg_pay_rate: rates.venue_average().map(round_money),
        labour_cost_percentage: LabourCostPercentage::compute(
            current.published_total,
            venue.weekly_forecast,
        ),
        approximate: current.approximate,
    }
}
