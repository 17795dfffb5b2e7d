//! Shift record model and related types.
//!
//! A [`ShiftRecord`] is the persisted unit of work assignment. It is only ever
//! created from, or fully replaced by, a validated [`ShiftDraft`], so its start,
//! end and break fields cannot drift out of step with each other.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RosterError, RosterResult};

use super::time_window::{REST_DAY_LABEL, TimeWindow};

/// Publication state of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftState {
    /// Editable and not yet visible to the employee.
    Draft,
    /// Visible to the employee and counted in official totals.
    Published,
    /// Withdrawn. Terminal, kept for audit.
    Cancelled,
}

impl ShiftState {
    /// Returns true if the lifecycle allows moving from `self` to `next`.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::ShiftState;
    ///
    /// assert!(ShiftState::Draft.can_transition_to(ShiftState::Published));
    /// assert!(ShiftState::Published.can_transition_to(ShiftState::Cancelled));
    /// assert!(!ShiftState::Cancelled.can_transition_to(ShiftState::Draft));
    /// ```
    pub fn can_transition_to(self, next: ShiftState) -> bool {
        matches!(
            (self, next),
            (ShiftState::Draft, ShiftState::Published)
                | (ShiftState::Draft, ShiftState::Cancelled)
                | (ShiftState::Published, ShiftState::Cancelled)
        )
    }
}

impl fmt::Display for ShiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftState::Draft => write!(f, "draft"),
            ShiftState::Published => write!(f, "published"),
            ShiftState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Caller-supplied shift data used for both creation and full replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDraft {
    /// The assigned employee, or `None` for an open shift.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The venue the shift belongs to.
    pub venue_id: String,
    /// The work area within the venue.
    #[serde(default)]
    pub work_area_id: Option<String>,
    /// The calendar date the shift starts on.
    pub date: NaiveDate,
    /// Start time of day. Required unless this is a rest day.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// End time of day. Required unless this is a rest day.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Marks a rostered day off.
    #[serde(default)]
    pub is_rest_day: bool,
    /// Unpaid break in minutes.
    #[serde(default)]
    pub break_minutes: u32,
    /// The role being worked, if different from the employee's usual role.
    #[serde(default)]
    pub role: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Set when the shift was produced by a repeat forward-fill.
    #[serde(default)]
    pub repeat: bool,
}

impl ShiftDraft {
    /// Validates the draft and returns its time window (`None` for rest days).
    ///
    /// Rest days must belong to an employee and carry no times or break. Worked
    /// shifts need both times and a window that survives [`TimeWindow::validate`].
    pub fn validate(&self) -> RosterResult<Option<TimeWindow>> {
        if self.venue_id.trim().is_empty() {
            return Err(RosterError::validation("venue_id", "venue is required"));
        }
        if self.employee_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(RosterError::validation(
                "employee_id",
                "employee identifier must not be blank",
            ));
        }

        if self.is_rest_day {
            if self.employee_id.is_none() {
                return Err(RosterError::validation(
                    "employee_id",
                    "a rest day must be assigned to an employee",
                ));
            }
            if self.start_time.is_some() || self.end_time.is_some() {
                return Err(RosterError::validation(
                    "start_time",
                    "a rest day cannot have start or end times",
                ));
            }
            if self.break_minutes != 0 {
                return Err(RosterError::validation(
                    "break_minutes",
                    "a rest day cannot have a break",
                ));
            }
            return Ok(None);
        }

        let start = self
            .start_time
            .ok_or_else(|| RosterError::validation("start_time", "start time is required"))?;
        let end = self
            .end_time
            .ok_or_else(|| RosterError::validation("end_time", "end time is required"))?;

        let window = TimeWindow::new(self.date, start, end, self.break_minutes)?;
        window.validate()?;
        Ok(Some(window))
    }
}

/// A persisted shift: an assignment, an open slot, or a rest day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The assigned employee, or `None` for an open shift.
    pub employee_id: Option<String>,
    /// The venue the shift belongs to.
    pub venue_id: String,
    /// The work area within the venue.
    pub work_area_id: Option<String>,
    /// The calendar date the shift starts on.
    pub date: NaiveDate,
    /// Normalized start/end instants; `None` for rest days.
    pub window: Option<TimeWindow>,
    /// Marks a rostered day off.
    pub is_rest_day: bool,
    /// The role being worked.
    pub role: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Publication state.
    pub state: ShiftState,
    /// Set when the shift was produced by a repeat forward-fill.
    pub repeat: bool,
    /// Optimistic concurrency token, bumped on every write.
    pub version: u64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl ShiftRecord {
    /// Validates `draft` and builds a new Draft-state record at version 1.
    pub fn create(id: Uuid, draft: ShiftDraft, now: DateTime<Utc>) -> RosterResult<Self> {
        let window = draft.validate()?;
        Ok(Self {
            id,
            employee_id: draft.employee_id,
            venue_id: draft.venue_id,
            work_area_id: draft.work_area_id,
            date: draft.date,
            window,
            is_rest_day: draft.is_rest_day,
            role: draft.role,
            notes: draft.notes,
            state: ShiftState::Draft,
            repeat: draft.repeat,
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns a copy with every editable field replaced by `draft`.
    ///
    /// Identity, state and creation time are kept; the version is bumped.
    pub fn replaced_by(&self, draft: ShiftDraft, now: DateTime<Utc>) -> RosterResult<Self> {
        let window = draft.validate()?;
        Ok(Self {
            id: self.id,
            employee_id: draft.employee_id,
            venue_id: draft.venue_id,
            work_area_id: draft.work_area_id,
            date: draft.date,
            window,
            is_rest_day: draft.is_rest_day,
            role: draft.role,
            notes: draft.notes,
            state: self.state,
            repeat: draft.repeat,
            version: self.version + 1,
            created_at: self.created_at,
            updated_at: now,
        })
    }

    /// Reconstructs the draft this record was built from.
    pub fn to_draft(&self) -> ShiftDraft {
        ShiftDraft {
            employee_id: self.employee_id.clone(),
            venue_id: self.venue_id.clone(),
            work_area_id: self.work_area_id.clone(),
            date: self.date,
            start_time: self.window.map(|w| w.start.time()),
            end_time: self.window.map(|w| w.end.time()),
            is_rest_day: self.is_rest_day,
            break_minutes: self.window.map_or(0, |w| w.break_minutes),
            role: self.role.clone(),
            notes: self.notes.clone(),
            repeat: self.repeat,
        }
    }

    /// Returns true if the shift has no employee yet.
    pub fn is_open(&self) -> bool {
        self.employee_id.is_none()
    }

    /// Returns true if the shift has been withdrawn.
    pub fn is_cancelled(&self) -> bool {
        self.state == ShiftState::Cancelled
    }

    /// Unrounded paid hours. Rest days and cancelled shifts report zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{ShiftDraft, ShiftRecord};
    /// use chrono::{NaiveDate, NaiveTime, Utc};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let draft = ShiftDraft {
    ///     employee_id: Some("emp_001".to_string()),
    ///     venue_id: "VEN-0001-01".to_string(),
    ///     work_area_id: None,
    ///     date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(9, 0, 0),
    ///     end_time: NaiveTime::from_hms_opt(17, 0, 0),
    ///     is_rest_day: false,
    ///     break_minutes: 30,
    ///     role: None,
    ///     notes: None,
    ///     repeat: false,
    /// };
    /// let shift = ShiftRecord::create(Uuid::new_v4(), draft, Utc::now()).unwrap();
    /// assert_eq!(shift.net_hours(), Decimal::new(75, 1)); // 7.5 hours
    /// ```
    pub fn net_hours(&self) -> Decimal {
        if self.is_rest_day || self.is_cancelled() {
            return Decimal::ZERO;
        }
        self.window.map_or(Decimal::ZERO, |w| w.net_hours())
    }

    /// Paid hours rounded to one decimal place.
    pub fn display_hours(&self) -> Decimal {
        super::time_window::round_hours(self.net_hours())
    }

    /// The roster cell label, derived from the persisted fields.
    pub fn label(&self) -> String {
        match (self.is_rest_day, self.window) {
            (true, _) => REST_DAY_LABEL.to_string(),
            (false, Some(window)) => window.label(),
            (false, None) => String::new(),
        }
    }

    /// Sort key used wherever shifts are listed: date, then start, then creation.
    pub fn ordering_key(&self) -> (NaiveDate, Option<NaiveDateTime>, DateTime<Utc>, Uuid) {
        (
            self.date,
            self.window.map(|w| w.start),
            self.created_at,
            self.id,
        )
    }
}
