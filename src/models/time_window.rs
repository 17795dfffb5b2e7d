//! Shift time window.
//!
//! A [`TimeWindow`] turns a calendar date plus start/end times of day into a pair
//! of instants, applying the overnight rule: an end time earlier than the start
//! time belongs to the following day. Every duration figure in the crate comes
//! from here so previews and persisted records never disagree.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RosterError, RosterResult};

/// Label shown in a roster cell for a rest day.
pub const REST_DAY_LABEL: &str = "RDO";

/// Normalized start/end instants of a worked shift and its unpaid break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// The start instant.
    pub start: NaiveDateTime,
    /// The end instant, on the following day for overnight shifts.
    pub end: NaiveDateTime,
    /// Unpaid break minutes deducted from the raw span.
    pub break_minutes: u32,
}

impl TimeWindow {
    /// Builds a window for `date`, wrapping past midnight when `end_time < start_time`.
    ///
    /// Fails on `date` when the wrapped end falls past the last representable date.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::TimeWindow;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    /// let window = TimeWindow::new(
    ///     date,
    ///     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     0,
    /// )
    /// .unwrap();
    /// assert!(window.is_overnight());
    /// assert_eq!(window.net_hours(), Decimal::new(80, 1)); // 8.0 hours
    /// ```
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        break_minutes: u32,
    ) -> RosterResult<Self> {
        let start = date.and_time(start_time);
        let mut end = date.and_time(end_time);
        if end_time < start_time {
            end = end.checked_add_signed(Duration::hours(24)).ok_or_else(|| {
                RosterError::validation(
                    "date",
                    format!("overnight shift on {} ends past the last supported date", date),
                )
            })?;
        }
        Ok(Self {
            start,
            end,
            break_minutes,
        })
    }

    /// Returns true when the window crosses midnight.
    pub fn is_overnight(&self) -> bool {
        self.end.date() > self.start.date()
    }

    /// Minutes between start and end, before the break is deducted.
    pub fn raw_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Paid minutes, floored at zero.
    pub fn net_minutes(&self) -> i64 {
        (self.raw_minutes() - i64::from(self.break_minutes)).max(0)
    }

    /// Unrounded paid hours. Cost math uses this value.
    pub fn net_hours(&self) -> Decimal {
        Decimal::new(self.net_minutes(), 0) / Decimal::new(60, 0)
    }

    /// Paid hours rounded to one decimal place for display.
    pub fn display_hours(&self) -> Decimal {
        round_hours(self.net_hours())
    }

    /// Rejects windows with no span or a break that swallows the whole span.
    pub fn validate(&self) -> RosterResult<()> {
        let raw = self.raw_minutes();
        if raw <= 0 {
            return Err(RosterError::validation(
                "end_time",
                "end time must differ from start time",
            ));
        }
        if i64::from(self.break_minutes) >= raw {
            return Err(RosterError::validation(
                "break_minutes",
                format!(
                    "unpaid break of {} minutes must be shorter than the {} minute shift",
                    self.break_minutes, raw
                ),
            ));
        }
        Ok(())
    }

    /// Cell label such as `22:00 - 06:00 (8.0hrs)`.
    pub fn label(&self) -> String {
        format!(
            "{} - {} ({}hrs)",
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.display_hours()
        )
    }
}

/// Rounds an hour figure to one decimal place, keeping the trailing zero.
pub fn round_hours(hours: Decimal) -> Decimal {
    let mut rounded = hours.round_dp(1);
    rounded.rescale(1);
    rounded
}
