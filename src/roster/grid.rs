//! Roster grid construction and placement.
//!
//! A [`RosterGrid`] maps each (employee, date) cell to at most one live shift.
//! It is rebuilt from the store for every request and never cached.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RosterError, RosterResult};
use crate::models::{Employee, ShiftRecord, ShiftState, UNKNOWN_EMPLOYEE_NAME, round_hours};

use super::filter::{DateRange, RosterFilter};

/// Finds a live shift that already holds the candidate's (employee, date) cell.
///
/// Open and cancelled candidates never conflict, and a shift never conflicts
/// with itself, so edits can be re-placed over their own cell.
pub fn find_conflict<'a, I>(existing: I, candidate: &ShiftRecord) -> Option<&'a ShiftRecord>
where
    I: IntoIterator<Item = &'a ShiftRecord>,
{
    if candidate.is_cancelled() {
        return None;
    }
    let employee_id = candidate.employee_id.as_deref()?;
    existing.into_iter().find(|shift| {
        shift.id != candidate.id
            && !shift.is_cancelled()
            && shift.date == candidate.date
            && shift.employee_id.as_deref() == Some(employee_id)
    })
}

/// The error returned when `candidate` collides with `occupant`.
pub fn conflict_error(occupant: &ShiftRecord, candidate: &ShiftRecord) -> RosterError {
    RosterError::Conflict {
        shift_id: occupant.id,
        message: format!(
            "employee '{}' already has a shift on {}",
            candidate.employee_id.as_deref().unwrap_or_default(),
            candidate.date
        ),
    }
}

/// Identity of a roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowHeader {
    /// Employee linking identifier.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Job role.
    pub role: Option<String>,
    /// Usual work area.
    pub work_area_id: Option<String>,
}

impl From<&Employee> for RowHeader {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id.clone(),
            name: employee.display_name(),
            role: employee.role.clone(),
            work_area_id: employee.work_area_id.clone(),
        }
    }
}

/// What a grid cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    /// Nothing rostered.
    Empty,
    /// One or more unassigned shifts (open-shift row only).
    Open,
    /// A worked shift.
    Assigned,
    /// A rostered day off.
    RestDay,
}

/// Presentation of one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// The cell's date.
    pub date: NaiveDate,
    /// What the cell holds.
    pub status: CellStatus,
    /// Shifts in the cell: one for employee rows, any number for the open row.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shift_ids: Vec<Uuid>,
    /// Version token of the occupying shift, for follow-up edits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Publication state of the occupying shift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ShiftState>,
    /// Display label, e.g. `RDO` or `09:00 - 17:00 (8.0hrs)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Paid hours, rounded to one decimal place.
    pub hours: Decimal,
}

impl GridCell {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            status: CellStatus::Empty,
            shift_ids: Vec::new(),
            version: None,
            state: None,
            label: None,
            hours: round_hours(Decimal::ZERO),
        }
    }

    fn occupied(shift: &ShiftRecord) -> Self {
        Self {
            date: shift.date,
            status: if shift.is_rest_day {
                CellStatus::RestDay
            } else {
                CellStatus::Assigned
            },
            shift_ids: vec![shift.id],
            version: Some(shift.version),
            state: Some(shift.state),
            label: Some(shift.label()),
            hours: shift.display_hours(),
        }
    }

    pub(crate) fn open(date: NaiveDate, shifts: &[&ShiftRecord]) -> Self {
        if shifts.is_empty() {
            return Self::empty(date);
        }
        let hours: Decimal = shifts.iter().map(|s| s.net_hours()).sum();
        Self {
            date,
            status: CellStatus::Open,
            shift_ids: shifts.iter().map(|s| s.id).collect(),
            version: None,
            state: None,
            label: Some(format!("{} open", shifts.len())),
            hours: round_hours(hours),
        }
    }
}

/// One employee row of the weekly view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    /// The employee.
    #[serde(flatten)]
    pub header: RowHeader,
    /// One cell per date in the range.
    pub cells: Vec<GridCell>,
    /// Paid hours across the row, rounded to one decimal place.
    pub total_hours: Decimal,
}

/// Serializable weekly view of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterGridView {
    /// The venue shown.
    pub venue_id: String,
    /// First date (inclusive).
    pub start_date: NaiveDate,
    /// Last date (inclusive).
    pub end_date: NaiveDate,
    /// Column dates, ascending.
    pub dates: Vec<NaiveDate>,
    /// Set when the range is not exactly seven days.
    pub approximate: bool,
    /// Employee rows ordered by name.
    pub rows: Vec<GridRow>,
    /// Unassigned shifts per date.
    pub open_shifts: Vec<GridCell>,
    /// Number of unassigned shifts per date.
    pub open_shift_counts: BTreeMap<NaiveDate, usize>,
}

/// Employee × date matrix of live shifts for one venue and date range.
#[derive(Debug, Clone)]
pub struct RosterGrid {
    filter: RosterFilter,
    rows: Vec<RowHeader>,
    cells: HashMap<(String, NaiveDate), ShiftRecord>,
    open_shifts: Vec<ShiftRecord>,
}

impl RosterGrid {
    /// An empty grid for `filter` with no rows.
    pub fn empty(filter: RosterFilter) -> Self {
        Self {
            filter,
            rows: Vec::new(),
            cells: HashMap::new(),
            open_shifts: Vec::new(),
        }
    }

    /// Builds a grid from the venue's employees and the shifts fetched for its range.
    ///
    /// Employees and shifts outside `filter` are dropped and cancelled shifts are
    /// ignored. Rows are ordered by display name; employees who hold shifts but
    /// are missing from `employees` still get a row.
    pub fn build(
        filter: RosterFilter,
        employees: Vec<Employee>,
        shifts: Vec<ShiftRecord>,
    ) -> RosterResult<Self> {
        let (employees, shifts) = filter.narrow(employees, shifts);
        let mut grid = Self::empty(filter);

        for shift in shifts {
            grid.place(shift)?;
        }

        let mut rows: Vec<RowHeader> = employees.iter().map(RowHeader::from).collect();
        let mut unknown: Vec<&String> = grid
            .cells
            .keys()
            .map(|(employee_id, _)| employee_id)
            .filter(|id| !employees.iter().any(|e| e.id == **id))
            .collect();
        unknown.sort();
        unknown.dedup();
        rows.extend(unknown.into_iter().map(|id| RowHeader {
            employee_id: id.clone(),
            name: UNKNOWN_EMPLOYEE_NAME.to_string(),
            role: None,
            work_area_id: None,
        }));
        rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.employee_id.cmp(&b.employee_id)));
        grid.rows = rows;

        tracing::debug!(
            venue_id = %grid.filter.venue_id,
            start = %grid.filter.range.start(),
            end = %grid.filter.range.end(),
            rows = grid.rows.len(),
            assigned = grid.cells.len(),
            open = grid.open_shifts.len(),
            "Built roster grid"
        );

        Ok(grid)
    }

    /// Places a shift into the grid.
    ///
    /// Cancelled shifts are ignored and open shifts join the open list. A shift
    /// landing on a cell held by a different shift fails with
    /// [`RosterError::Conflict`] naming the occupant; a shift re-placed over its
    /// own cell replaces the previous copy.
    pub fn place(&mut self, shift: ShiftRecord) -> RosterResult<()> {
        if shift.is_cancelled() {
            return Ok(());
        }

        if let Some(occupant) = find_conflict(self.cells.values(), &shift) {
            return Err(conflict_error(occupant, &shift));
        }

        // An edit may move a shift between cells or from open to assigned.
        self.remove(shift.id);

        match shift.employee_id.clone() {
            Some(employee_id) => {
                self.cells.insert((employee_id, shift.date), shift);
            }
            None => {
                let position = self
                    .open_shifts
                    .partition_point(|s| (s.created_at, s.id) < (shift.created_at, shift.id));
                self.open_shifts.insert(position, shift);
            }
        }
        Ok(())
    }

    /// Removes a shift from its cell or from the open list.
    pub fn remove(&mut self, shift_id: Uuid) -> Option<ShiftRecord> {
        if let Some(key) = self
            .cells
            .iter()
            .find(|(_, shift)| shift.id == shift_id)
            .map(|(key, _)| key.clone())
        {
            return self.cells.remove(&key);
        }
        let position = self.open_shifts.iter().position(|s| s.id == shift_id)?;
        Some(self.open_shifts.remove(position))
    }

    /// The shift occupying (employee, date), if any.
    pub fn cell(&self, employee_id: &str, date: NaiveDate) -> Option<&ShiftRecord> {
        self.cells.get(&(employee_id.to_string(), date))
    }

    /// The filter this grid was built for.
    pub fn filter(&self) -> &RosterFilter {
        &self.filter
    }

    /// The grid's date range.
    pub fn range(&self) -> DateRange {
        self.filter.range
    }

    /// Row headers, ordered by name.
    pub fn rows(&self) -> &[RowHeader] {
        &self.rows
    }

    /// Open shifts ordered by creation time.
    pub fn open_shifts(&self) -> &[ShiftRecord] {
        &self.open_shifts
    }

    /// Every live shift in the grid: assigned cells first, then open shifts.
    pub fn shifts(&self) -> impl Iterator<Item = &ShiftRecord> {
        self.cells.values().chain(self.open_shifts.iter())
    }

    /// Returns true when weekly percentages computed over this grid are approximate.
    pub fn is_approximate(&self) -> bool {
        !self.filter.range.is_full_week()
    }

    /// Renders the grid into its serializable weekly view.
    pub fn view(&self) -> RosterGridView {
        let dates = self.filter.range.dates();

        let rows = self
            .rows
            .iter()
            .map(|header| {
                let cells: Vec<GridCell> = dates
                    .iter()
                    .map(|date| match self.cell(&header.employee_id, *date) {
                        Some(shift) => GridCell::occupied(shift),
                        None => GridCell::empty(*date),
                    })
                    .collect();
                let total: Decimal = dates
                    .iter()
                    .filter_map(|date| self.cell(&header.employee_id, *date))
                    .map(ShiftRecord::net_hours)
                    .sum();
                GridRow {
                    header: header.clone(),
                    cells,
                    total_hours: round_hours(total),
                }
            })
            .collect();

        RosterGridView {
            venue_id: self.filter.venue_id.clone(),
            start_date: self.filter.range.start(),
            end_date: self.filter.range.end(),
            approximate: self.is_approximate(),
            rows,
            open_shifts: super::open_shifts::open_shift_row(self),
            open_shift_counts: super::open_shifts::count_by_date(self),
            dates,
        }
    }
}
