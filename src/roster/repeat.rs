//! Repeat forward-fill planning.
//!
//! A repeat copies one shift onto the same weekday of the following weeks. Each
//! copy is an independent record placed under the normal conflict rule, and
//! every target date gets its own [`RepeatOutcome`].

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RosterError, RosterResult};
use crate::models::{ShiftDraft, ShiftRecord};

/// Result of filling one target date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepeatOutcome {
    /// A new record was written.
    Created {
        /// Target date.
        date: NaiveDate,
        /// The new record.
        shift: Box<ShiftRecord>,
    },
    /// The target cell was already held.
    Conflict {
        /// Target date.
        date: NaiveDate,
        /// The occupying shift.
        conflicting_shift_id: Uuid,
        /// Why the copy was refused.
        message: String,
    },
    /// The copy failed for another reason.
    Rejected {
        /// Target date.
        date: NaiveDate,
        /// Why the copy was refused.
        message: String,
    },
}

impl RepeatOutcome {
    /// Classifies the result of inserting one copy.
    pub fn from_result(date: NaiveDate, result: Result<ShiftRecord, RosterError>) -> Self {
        match result {
            Ok(shift) => Self::Created {
                date,
                shift: Box::new(shift),
            },
            Err(RosterError::Conflict { shift_id, message }) => Self::Conflict {
                date,
                conflicting_shift_id: shift_id,
                message,
            },
            Err(err) => Self::Rejected {
                date,
                message: err.to_string(),
            },
        }
    }

    /// The target date.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Created { date, .. } | Self::Conflict { date, .. } | Self::Rejected { date, .. } => {
                *date
            }
        }
    }

    /// Returns true if a record was written.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Target dates for repeating a shift on `source` for `weeks` weeks.
///
/// Fails on `weeks` when the last copy would fall past the last representable date.
///
/// # Examples
///
/// ```
/// use roster_engine::roster::plan_repeat_dates;
/// use chrono::NaiveDate;
///
/// let source = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let dates = plan_repeat_dates(source, 2).unwrap();
/// assert_eq!(dates, vec![
///     NaiveDate::from_ymd_opt(2024, 6, 17).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 24).unwrap(),
/// ]);
/// ```
pub fn plan_repeat_dates(source: NaiveDate, weeks: u32) -> RosterResult<Vec<NaiveDate>> {
    (1..=i64::from(weeks))
        .map(|week| {
            source
                .checked_add_signed(Duration::weeks(week))
                .ok_or_else(|| {
                    RosterError::validation(
                        "weeks",
                        format!(
                            "repeating {} for {} weeks runs past the last supported date",
                            source, weeks
                        ),
                    )
                })
        })
        .collect()
}

/// Draft for the copy of `source` on `date`.
pub fn repeat_draft(source: &ShiftRecord, date: NaiveDate) -> ShiftDraft {
    ShiftDraft {
        date,
        repeat: true,
        ..source.to_draft()
    }
}

/// Clamps a requested week count to `1..=max_weeks`.
pub fn clamp_weeks(requested: u32, max_weeks: u32) -> u32 {
    requested.clamp(1, max_weeks.max(1))
}
