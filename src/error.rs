//! Error types for the roster engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every rejection a roster operation can produce.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ShiftState;

/// The main error type for the roster engine.
///
/// Mutating operations fail with exactly one of these before anything is
/// written; read operations fail as a whole rather than returning partial data.
///
/// # Example
///
/// ```
/// use roster_engine::error::RosterError;
///
/// let error = RosterError::Validation {
///     field: "break_minutes".to_string(),
///     message: "break must be shorter than the shift".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid field 'break_minutes': break must be shorter than the shift"
/// );
/// ```
#[derive(Debug, Error)]
pub enum RosterError {
    /// The submitted shift data is malformed.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The target roster cell is already occupied by another shift.
    #[error("Conflict with shift '{shift_id}': {message}")]
    Conflict {
        /// The shift currently occupying the cell.
        shift_id: Uuid,
        /// A description of the conflict.
        message: String,
    },

    /// The shift changed since the caller read it.
    #[error("Shift '{shift_id}' was modified concurrently: expected version {expected}, found {actual}")]
    StaleVersion {
        /// The shift being edited.
        shift_id: Uuid,
        /// The version supplied by the caller.
        expected: u64,
        /// The version currently stored.
        actual: u64,
    },

    /// The shift does not exist or has been cancelled.
    #[error("Shift not found: {shift_id}")]
    NotFound {
        /// The requested shift identifier.
        shift_id: Uuid,
    },

    /// The requested lifecycle transition is not allowed.
    #[error("Shift '{shift_id}' cannot move from {from} to {to}")]
    InvalidTransition {
        /// The shift being transitioned.
        shift_id: Uuid,
        /// The current state.
        from: ShiftState,
        /// The requested state.
        to: ShiftState,
    },

    /// A date range ended before it started.
    #[error("Invalid date range: {end} is before {start}")]
    InvalidDateRange {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
    },

    /// The venue is not in the catalog.
    #[error("Venue not found: {venue_id}")]
    VenueNotFound {
        /// The requested venue identifier.
        venue_id: String,
    },

    /// The employee is not in the roster feed.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The requested employee identifier.
        employee_id: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The shift store or a collaborator feed failed.
    #[error("Store error: {message}")]
    Store {
        /// A description of the failure.
        message: String,
    },
}

impl RosterError {
    /// Shorthand for a [`RosterError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for occupancy and stale-version conflicts.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::StaleVersion { .. })
    }
}

/// A type alias for Results that return RosterError.
pub type RosterResult<T> = Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = RosterError::validation("employee_id", "required for a rest day");
        assert_eq!(
            error.to_string(),
            "Invalid field 'employee_id': required for a rest day"
        );
    }

    #[test]
    fn test_conflict_displays_occupying_shift() {
        let shift_id = Uuid::nil();
        let error = RosterError::Conflict {
            shift_id,
            message: "employee already rostered on 2024-06-10".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Conflict with shift '00000000-0000-0000-0000-000000000000': employee already rostered on 2024-06-10"
        );
        assert!(error.is_conflict());
    }

    #[test]
    fn test_stale_version_is_conflict() {
        let error = RosterError::StaleVersion {
            shift_id: Uuid::nil(),
            expected: 1,
            actual: 2,
        };
        assert!(error.is_conflict());
        assert!(error.to_string().contains("expected version 1, found 2"));
    }

    #[test]
    fn test_not_found_is_not_conflict() {
        let error = RosterError::NotFound {
            shift_id: Uuid::nil(),
        };
        assert!(!error.is_conflict());
    }

    #[test]
    fn test_invalid_transition_displays_states() {
        let error = RosterError::InvalidTransition {
            shift_id: Uuid::nil(),
            from: ShiftState::Published,
            to: ShiftState::Published,
        };
        assert!(error.to_string().ends_with("cannot move from published to published"));
    }

    #[test]
    fn test_invalid_date_range_displays_dates() {
        let error = RosterError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 6, 16).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: 2024-06-10 is before 2024-06-16"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = RosterError::ConfigNotFound {
            path: "/missing/roster.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/roster.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<RosterError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> RosterResult<()> {
            Err(RosterError::NotFound {
                shift_id: Uuid::nil(),
            })
        }

        fn propagates_error() -> RosterResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
