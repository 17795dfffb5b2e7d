//! Open-shift tracking.
//!
//! Counts and lists unassigned shifts per date. Everything here is derived from
//! a freshly built [`RosterGrid`], so counts follow the grid's filter and never
//! include cancelled shifts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ShiftRecord;

use super::grid::{GridCell, RosterGrid};

/// Number of open shifts on every date of the grid's range, zeros included.
pub fn count_by_date(grid: &RosterGrid) -> BTreeMap<NaiveDate, usize> {
    let mut counts: BTreeMap<NaiveDate, usize> =
        grid.range().dates().into_iter().map(|date| (date, 0)).collect();
    for shift in grid.open_shifts() {
        if let Some(count) = counts.get_mut(&shift.date) {
            *count += 1;
        }
    }
    counts
}

/// Open shifts on `date`, earliest created first.
pub fn list_by_date(grid: &RosterGrid, date: NaiveDate) -> Vec<&ShiftRecord> {
    grid.open_shifts()
        .iter()
        .filter(|shift| shift.date == date)
        .collect()
}

/// Total open shifts across the grid.
pub fn total(grid: &RosterGrid) -> usize {
    grid.open_shifts().len()
}

/// Open shifts for a venue and range, grouped by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenShiftReport {
    /// The venue queried.
    pub venue_id: String,
    /// First date (inclusive).
    pub start_date: NaiveDate,
    /// Last date (inclusive).
    pub end_date: NaiveDate,
    /// Count per date, zeros included.
    pub counts: BTreeMap<NaiveDate, usize>,
    /// Open shifts per date, earliest created first. Dates without any are omitted.
    pub shifts: BTreeMap<NaiveDate, Vec<ShiftRecord>>,
    /// Open shifts across the range.
    pub total: usize,
}

impl OpenShiftReport {
    /// Builds the report from a grid.
    pub fn from_grid(grid: &RosterGrid) -> Self {
        let range = grid.range();
        let mut shifts: BTreeMap<NaiveDate, Vec<ShiftRecord>> = BTreeMap::new();
        for shift in grid.open_shifts() {
            shifts.entry(shift.date).or_default().push(shift.clone());
        }
        Self {
            venue_id: grid.filter().venue_id.clone(),
            start_date: range.start(),
            end_date: range.end(),
            counts: count_by_date(grid),
            shifts,
            total: total(grid),
        }
    }
}

/// The open-shift row of the weekly view, one cell per date.
pub(crate) fn open_shift_row(grid: &RosterGrid) -> Vec<GridCell> {
    grid.range()
        .dates()
        .into_iter()
        .map(|date| GridCell::open(date, &list_by_date(grid, date)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftDraft, ShiftState};
    use crate::roster::filter::{DateRange, RosterFilter};
    use chrono::{Duration, NaiveTime, Utc};
    use uuid::Uuid;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn shift(employee_id: Option<&str>, date: &str) -> ShiftRecord {
        let draft = ShiftDraft {
            employee_id: employee_id.map(str::to_string),
            venue_id: "V1".to_string(),
            work_area_id: None,
            date: make_date(date),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(17, 0, 0),
            is_rest_day: false,
            break_minutes: 0,
            role: None,
            notes: None,
            repeat: false,
        };
        ShiftRecord::create(Uuid::new_v4(), draft, Utc::now()).unwrap()
    }

    fn grid(shifts: Vec<ShiftRecord>) -> RosterGrid {
        let filter = RosterFilter::new("V1", DateRange::week_from(make_date("2024-06-10")).unwrap());
        RosterGrid::build(filter, vec![], shifts).unwrap()
    }

    #[test]
    fn test_counts_cover_every_date_including_zeros() {
        let grid = grid(vec![
            shift(None, "2024-06-10"),
            shift(None, "2024-06-10"),
            shift(None, "2024-06-14"),
            shift(Some("E1"), "2024-06-11"),
        ]);

        let counts = count_by_date(&grid);
        assert_eq!(counts.len(), 7);
        assert_eq!(counts[&make_date("2024-06-10")], 2);
        assert_eq!(counts[&make_date("2024-06-11")], 0);
        assert_eq!(counts[&make_date("2024-06-14")], 1);
        assert_eq!(total(&grid), 3);
    }

    #[test]
    fn test_cancelled_open_shifts_are_not_counted() {
        let mut cancelled = shift(None, "2024-06-12");
        cancelled.state = ShiftState::Cancelled;

        let grid = grid(vec![cancelled]);
        assert_eq!(count_by_date(&grid)[&make_date("2024-06-12")], 0);
    }

    #[test]
    fn test_list_by_date_in_creation_order() {
        let now = Utc::now();
        let mut second = shift(None, "2024-06-10");
        second.created_at = now + Duration::seconds(5);
        let mut first = shift(None, "2024-06-10");
        first.created_at = now;
        let other_day = shift(None, "2024-06-11");

        let grid = grid(vec![second.clone(), other_day, first.clone()]);
        let listed: Vec<Uuid> = list_by_date(&grid, make_date("2024-06-10"))
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(listed, vec![first.id, second.id]);
    }

    #[test]
    fn test_assignment_removes_shift_from_open_count() {
        let open = shift(None, "2024-06-13");
        let mut grid = grid(vec![open.clone()]);
        assert_eq!(count_by_date(&grid)[&make_date("2024-06-13")], 1);

        let mut draft = open.to_draft();
        draft.employee_id = Some("E1".to_string());
        let assigned = open.replaced_by(draft, Utc::now()).unwrap();
        grid.place(assigned).unwrap();

        assert_eq!(count_by_date(&grid)[&make_date("2024-06-13")], 0);
        assert!(grid.cell("E1", make_date("2024-06-13")).is_some());
    }

    #[test]
    fn test_report_groups_open_shifts_by_date() {
        let grid = grid(vec![
            shift(None, "2024-06-10"),
            shift(None, "2024-06-12"),
            shift(None, "2024-06-12"),
        ]);

        let report = OpenShiftReport::from_grid(&grid);
        assert_eq!(report.total, 3);
        assert_eq!(report.counts.len(), 7);
        assert_eq!(report.shifts.len(), 2);
        assert_eq!(report.shifts[&make_date("2024-06-12")].len(), 2);
        assert_eq!(report.start_date, make_date("2024-06-10"));
    }
}
