//! Date ranges and roster filters.
//!
//! Narrowing is pure: a [`RosterFilter`] decides which employees and shifts a
//! grid or summary should see, and holds no state of its own.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{RosterError, RosterResult};
use crate::models::{Employee, ShiftRecord};

/// Days in the weekly roster view.
pub const WEEK_DAYS: i64 = 7;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting one whose end precedes its start.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::roster::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
    /// let range = DateRange::new(start, end).unwrap();
    /// assert!(range.is_full_week());
    ///
    /// assert!(DateRange::new(end, start).is_err());
    /// ```
    pub fn new(start: NaiveDate, end: NaiveDate) -> RosterResult<Self> {
        if end < start {
            return Err(RosterError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The seven days beginning at `start`.
    ///
    /// Fails on `start_date` when the week runs past the last representable date.
    pub fn week_from(start: NaiveDate) -> RosterResult<Self> {
        let end = start
            .checked_add_signed(Duration::days(WEEK_DAYS - 1))
            .ok_or_else(|| {
                RosterError::validation(
                    "start_date",
                    format!("week starting {} runs past the last supported date", start),
                )
            })?;
        Ok(Self { start, end })
    }

    /// The week containing `date`, beginning on `week_start`.
    pub fn week_containing(date: NaiveDate, week_start: Weekday) -> RosterResult<Self> {
        let offset = (7 + date.weekday().num_days_from_monday()
            - week_start.num_days_from_monday())
            % 7;
        let start = date
            .checked_sub_signed(Duration::days(i64::from(offset)))
            .ok_or_else(|| {
                RosterError::validation(
                    "start_date",
                    format!("week containing {} starts before the first supported date", date),
                )
            })?;
        Self::week_from(start)
    }

    /// First date (inclusive).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if the range is exactly seven consecutive days.
    pub fn is_full_week(&self) -> bool {
        self.len_days() == WEEK_DAYS
    }

    /// Every date in the range, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|date| *date <= self.end)
            .collect()
    }

    /// The range of equal length immediately before this one.
    pub fn preceding(&self) -> RosterResult<Self> {
        let len = Duration::days(self.len_days());
        let shift_back = |date: NaiveDate| {
            date.checked_sub_signed(len).ok_or_else(|| {
                RosterError::validation(
                    "start_date",
                    format!(
                        "the {} days before {} start before the first supported date",
                        self.len_days(),
                        self.start
                    ),
                )
            })
        };
        Ok(Self {
            start: shift_back(self.start)?,
            end: shift_back(self.end)?,
        })
    }
}

/// Scope of a roster query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterFilter {
    /// The venue queried.
    pub venue_id: String,
    /// The dates queried.
    pub range: DateRange,
    /// Only this employee, when set.
    pub employee_id: Option<String>,
    /// Only this work area, when set.
    pub work_area_id: Option<String>,
}

impl RosterFilter {
    /// A filter over a whole venue for `range`.
    pub fn new(venue_id: impl Into<String>, range: DateRange) -> Self {
        Self {
            venue_id: venue_id.into(),
            range,
            employee_id: None,
            work_area_id: None,
        }
    }

    /// Restricts the filter to one employee.
    pub fn with_employee(mut self, employee_id: Option<String>) -> Self {
        self.employee_id = employee_id;
        self
    }

    /// Restricts the filter to one work area.
    pub fn with_work_area(mut self, work_area_id: Option<String>) -> Self {
        self.work_area_id = work_area_id;
        self
    }

    /// Returns true if the employee belongs in a roster row.
    pub fn matches_employee(&self, employee: &Employee) -> bool {
        if employee.venue_id != self.venue_id {
            return false;
        }
        if self.employee_id.as_ref().is_some_and(|id| employee.id != *id) {
            return false;
        }
        match &self.work_area_id {
            Some(area) => employee.work_area_id.as_deref() == Some(area.as_str()),
            None => true,
        }
    }

    /// Returns true if the shift falls inside the filter.
    ///
    /// A shift without its own work area is matched on the assigned employee's
    /// usual work area, passed as `employee_work_area`.
    pub fn matches_shift(&self, shift: &ShiftRecord, employee_work_area: Option<&str>) -> bool {
        if shift.venue_id != self.venue_id || !self.range.contains(shift.date) {
            return false;
        }
        if self
            .employee_id
            .as_deref()
            .is_some_and(|id| shift.employee_id.as_deref() != Some(id))
        {
            return false;
        }
        match &self.work_area_id {
            Some(area) => {
                let effective = shift.work_area_id.as_deref().or(employee_work_area);
                effective == Some(area.as_str())
            }
            None => true,
        }
    }

    /// Keeps the employees and shifts that match the filter.
    pub fn narrow(
        &self,
        employees: Vec<Employee>,
        shifts: Vec<ShiftRecord>,
    ) -> (Vec<Employee>, Vec<ShiftRecord>) {
        let work_areas: HashMap<&str, Option<&str>> = employees
            .iter()
            .map(|e| (e.id.as_str(), e.work_area_id.as_deref()))
            .collect();

        let shifts = shifts
            .into_iter()
            .filter(|shift| {
                let employee_area = shift
                    .employee_id
                    .as_deref()
                    .and_then(|id| work_areas.get(id).copied().flatten());
                self.matches_shift(shift, employee_area)
            })
            .collect();

        let employees = employees
            .into_iter()
            .filter(|e| self.matches_employee(e))
            .collect();

        (employees, shifts)
    }
}
