//! Request types for the roster API.
//!
//! Query strings and JSON bodies accepted by the roster endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ShiftDraft;
use crate::roster::{DateRange, RosterFilter};

/// Query parameters shared by the grid, listing, open-shift and summary endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterQuery {
    /// The venue to show.
    pub venue_id: String,
    /// First date; defaults to the start of the current week.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last date (inclusive); defaults to six days after `start_date`.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Only this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Only this work area.
    #[serde(default)]
    pub work_area_id: Option<String>,
}

impl RosterQuery {
    /// Builds the filter for an already-resolved range.
    pub fn into_filter(self, range: DateRange) -> RosterFilter {
        RosterFilter::new(self.venue_id, range)
            .with_employee(non_blank(self.employee_id))
            .with_work_area(non_blank(self.work_area_id))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Body of `PUT /shifts/{id}`: the full replacement plus the version it was read at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShiftRequest {
    /// Version token the caller last read.
    pub version: u64,
    /// Replacement fields.
    #[serde(flatten)]
    pub shift: ShiftDraft,
}

/// Body of `POST /shifts/{id}/publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishShiftRequest {
    /// Version token the caller last read.
    pub version: u64,
}

/// Body of `POST /shifts/{id}/assign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignShiftRequest {
    /// The employee taking the open shift.
    pub employee_id: String,
    /// Version token the caller last read.
    pub version: u64,
}

/// Body of `POST /shifts/{id}/repeat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepeatShiftRequest {
    /// Weeks to fill; the configured default when omitted.
    #[serde(default)]
    pub weeks: Option<u32>,
}

/// Query of `DELETE /shifts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelShiftQuery {
    /// Version token the caller last read; unchecked when omitted.
    #[serde(default)]
    pub version: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_flattens_shift_fields() {
        let json = r#"{
            "version": 3,
            "employee_id": "emp_001",
            "venue_id": "VEN-0001-01",
            "date": "2024-06-10",
            "start_time": "09:00:00",
            "end_time": "17:00:00",
            "break_minutes": 30
        }"#;

        let request: UpdateShiftRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.version, 3);
        assert_eq!(request.shift.employee_id.as_deref(), Some("emp_001"));
        assert_eq!(request.shift.break_minutes, 30);
        assert!(!request.shift.is_rest_day);
    }

    #[test]
    fn test_query_blank_filters_are_ignored() {
        let query = RosterQuery {
            venue_id: "V1".to_string(),
            employee_id: Some("  ".to_string()),
            work_area_id: Some("BAR".to_string()),
            ..RosterQuery::default()
        };
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let filter = query.into_filter(DateRange::week_from(start).unwrap());

        assert!(filter.employee_id.is_none());
        assert_eq!(filter.work_area_id.as_deref(), Some("BAR"));
    }

    #[test]
    fn test_repeat_request_weeks_optional() {
        let request: RepeatShiftRequest = serde_json::from_str("{}").unwrap();
        assert!(request.weeks.is_none());
    }
}
