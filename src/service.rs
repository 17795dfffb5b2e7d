//! Request-scoped roster operations.
//!
//! [`RosterService`] ties the shift store to the employee directory and venue
//! catalog. Every call fetches what it needs, computes, and returns; nothing
//! roster-shaped is kept between calls.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::RosterSettings;
use crate::directory::{EmployeeDirectory, VenueCatalog};
use crate::error::{RosterError, RosterResult};
use crate::models::{Employee, FinancialSummary, ShiftDraft, ShiftRecord, ShiftState, Venue};
use crate::roster::{
    DateRange, OpenShiftReport, RateBook, RepeatOutcome, RosterFilter, RosterGrid, clamp_weeks,
    financial_summary, plan_repeat_dates, repeat_draft, rollup,
};
use crate::store::ShiftStore;

/// Entry point for shift mutations and roster queries.
#[derive(Clone)]
pub struct RosterService {
    store: Arc<dyn ShiftStore>,
    employees: Arc<dyn EmployeeDirectory>,
    venues: Arc<dyn VenueCatalog>,
    settings: RosterSettings,
}

impl RosterService {
    /// Creates a service over the given store and collaborators.
    pub fn new(
        store: Arc<dyn ShiftStore>,
        employees: Arc<dyn EmployeeDirectory>,
        venues: Arc<dyn VenueCatalog>,
        settings: RosterSettings,
    ) -> Self {
        Self {
            store,
            employees,
            venues,
            settings,
        }
    }

    /// Engine settings in use.
    pub fn settings(&self) -> &RosterSettings {
        &self.settings
    }

    /// Resolves an optional start/end pair into a range.
    ///
    /// A missing end spans seven days from the start; a missing start uses the
    /// current week. Ranges longer than `max_range_days` are rejected on
    /// `end_date`.
    pub fn resolve_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RosterResult<DateRange> {
        let start = match start {
            Some(start) => start,
            None => DateRange::week_containing(
                Utc::now().date_naive(),
                self.settings.week_starts_on,
            )?
            .start(),
        };
        let range = match end {
            Some(end) => DateRange::new(start, end)?,
            None => DateRange::week_from(start)?,
        };

        let max_days = self.settings.max_range_days;
        if range.len_days() > i64::from(max_days) {
            return Err(RosterError::validation(
                "end_date",
                format!(
                    "range of {} days exceeds the limit of {} days",
                    range.len_days(),
                    max_days
                ),
            ));
        }
        Ok(range)
    }

    fn venue(&self, venue_id: &str) -> RosterResult<Venue> {
        self.venues
            .venue(venue_id)?
            .ok_or_else(|| RosterError::VenueNotFound {
                venue_id: venue_id.to_string(),
            })
    }

    fn employee(&self, employee_id: &str) -> RosterResult<Employee> {
        self.employees
            .employee(employee_id)?
            .ok_or_else(|| RosterError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Checks the draft's references against the catalog and directory.
    fn check_references(&self, draft: &ShiftDraft) -> RosterResult<()> {
        let venue = self.venue(&draft.venue_id)?;
        if let Some(area) = draft.work_area_id.as_deref() {
            if venue.work_area(area).is_none() {
                return Err(RosterError::validation(
                    "work_area_id",
                    format!("work area '{}' does not belong to venue '{}'", area, venue.id),
                ));
            }
        }
        if let Some(employee_id) = draft.employee_id.as_deref() {
            self.employee(employee_id)?;
        }
        Ok(())
    }

    fn live_shift(&self, id: Uuid) -> RosterResult<ShiftRecord> {
        self.store
            .get(id)?
            .filter(|shift| !shift.is_cancelled())
            .ok_or(RosterError::NotFound { shift_id: id })
    }

    /// Creates a Draft shift.
    pub fn create_shift(&self, draft: ShiftDraft) -> RosterResult<ShiftRecord> {
        draft.validate()?;
        self.check_references(&draft)?;

        let record = ShiftRecord::create(Uuid::new_v4(), draft, Utc::now())?;
        match self.store.insert(record) {
            Ok(shift) => {
                info!(
                    shift_id = %shift.id,
                    employee_id = ?shift.employee_id,
                    venue_id = %shift.venue_id,
                    date = %shift.date,
                    "Shift created"
                );
                Ok(shift)
            }
            Err(err) => {
                warn!(error = %err, "Shift creation rejected");
                Err(err)
            }
        }
    }

    /// Replaces a shift's fields, provided `version` is still current.
    pub fn update_shift(
        &self,
        id: Uuid,
        version: u64,
        draft: ShiftDraft,
    ) -> RosterResult<ShiftRecord> {
        draft.validate()?;
        self.check_references(&draft)?;

        let result = self.store.replace(id, version, draft, Utc::now());
        log_mutation("updated", id, &result);
        result
    }

    /// Assigns an employee to an open shift, keeping its identifier.
    pub fn assign_open_shift(
        &self,
        id: Uuid,
        employee_id: &str,
        version: u64,
    ) -> RosterResult<ShiftRecord> {
        let shift = self.live_shift(id)?;
        if !shift.is_open() {
            return Err(RosterError::validation(
                "employee_id",
                format!("shift '{}' is already assigned", id),
            ));
        }
        self.employee(employee_id)?;

        let mut draft = shift.to_draft();
        draft.employee_id = Some(employee_id.to_string());
        let result = self.store.replace(id, version, draft, Utc::now());
        log_mutation("assigned", id, &result);
        result
    }

    /// Publishes a Draft shift.
    pub fn publish_shift(&self, id: Uuid, version: u64) -> RosterResult<ShiftRecord> {
        let result = self
            .store
            .transition(id, Some(version), ShiftState::Published, Utc::now());
        log_mutation("published", id, &result);
        result
    }

    /// Cancels a shift. The record is kept for audit but leaves every roster view.
    pub fn cancel_shift(&self, id: Uuid, version: Option<u64>) -> RosterResult<ShiftRecord> {
        let result = self
            .store
            .transition(id, version, ShiftState::Cancelled, Utc::now());
        log_mutation("cancelled", id, &result);
        result
    }

    /// Copies a shift onto the same weekday of the following weeks.
    ///
    /// `weeks` defaults to the configured value and is capped at the configured
    /// maximum. Each date is attempted independently and reported in order.
    pub fn repeat_shift(&self, id: Uuid, weeks: Option<u32>) -> RosterResult<Vec<RepeatOutcome>> {
        let source = self.live_shift(id)?;
        let repeat = &self.settings.repeat;
        let weeks = clamp_weeks(weeks.unwrap_or(repeat.default_weeks), repeat.max_weeks);

        let outcomes: Vec<RepeatOutcome> = plan_repeat_dates(source.date, weeks)?
            .into_iter()
            .map(|date| {
                let result = ShiftRecord::create(
                    Uuid::new_v4(),
                    repeat_draft(&source, date),
                    Utc::now(),
                )
                .and_then(|record| self.store.insert(record));
                RepeatOutcome::from_result(date, result)
            })
            .collect();

        let created = outcomes.iter().filter(|o| o.is_created()).count();
        info!(
            shift_id = %id,
            weeks = weeks,
            created = created,
            skipped = outcomes.len() - created,
            "Shift repeated"
        );
        Ok(outcomes)
    }

    /// Fetches a shift, cancelled ones included.
    pub fn get_shift(&self, id: Uuid) -> RosterResult<ShiftRecord> {
        self.store
            .get(id)?
            .ok_or(RosterError::NotFound { shift_id: id })
    }

    fn fetch(&self, filter: &RosterFilter) -> RosterResult<(Venue, Vec<Employee>, Vec<ShiftRecord>)> {
        let venue = self.venue(&filter.venue_id)?;
        let employees = self.employees.employees_for_venue(&venue.id)?;
        let shifts = self.store.query(&venue.id, filter.range)?;
        Ok((venue, employees, shifts))
    }

    /// Live shifts matching `filter`, ordered by date then start time.
    pub fn list_shifts(&self, filter: &RosterFilter) -> RosterResult<Vec<ShiftRecord>> {
        let (_, employees, shifts) = self.fetch(filter)?;
        let (_, mut shifts) = filter.narrow(employees, shifts);
        shifts.sort_by_key(|s| s.ordering_key());
        Ok(shifts)
    }

    /// Builds the roster grid for `filter`.
    pub fn build_grid(&self, filter: RosterFilter) -> RosterResult<RosterGrid> {
        let (_, employees, shifts) = self.fetch(&filter)?;
        RosterGrid::build(filter, employees, shifts)
    }

    /// Open shifts for `filter`, counted and listed per date.
    pub fn open_shifts(&self, filter: RosterFilter) -> RosterResult<OpenShiftReport> {
        let grid = self.build_grid(filter)?;
        Ok(OpenShiftReport::from_grid(&grid))
    }

    /// Financial Summary for `filter`, compared with the preceding range.
    pub fn financial_summary(&self, filter: &RosterFilter) -> RosterResult<FinancialSummary> {
        let venue = self.venue(&filter.venue_id)?;
        let employees = self.employees.employees_for_venue(&venue.id)?;
        let rates = RateBook::build(&venue, &employees, &self.settings.standard_hours);

        let range = filter.range;
        let prior_range = range.preceding()?;
        let prior_filter = RosterFilter {
            range: prior_range,
            ..filter.clone()
        };

        let (_, current) = filter.narrow(employees.clone(), self.store.query(&venue.id, range)?);
        let (_, prior) = prior_filter.narrow(employees, self.store.query(&venue.id, prior_range)?);

        let current = rollup(&current, &rates, venue.weekly_forecast, range);
        let prior = rollup(&prior, &rates, venue.weekly_forecast, prior_range);

        Ok(financial_summary(&venue, range, &current, &prior, &rates))
    }
}

fn log_mutation(action: &str, id: Uuid, result: &RosterResult<ShiftRecord>) {
    match result {
        Ok(shift) => info!(
            shift_id = %shift.id,
            employee_id = ?shift.employee_id,
            version = shift.version,
            state = %shift.state,
            "Shift {}",
            action
        ),
        Err(err) => warn!(shift_id = %id, error = %err, "Shift {} rejected", action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::LabourCostPercentage;
    use crate::roster::CellStatus;
    use crate::store::InMemoryShiftStore;
    use chrono::{Duration, NaiveTime};
    use rust_decimal::Decimal;

    const VENUE: &str = "VEN-0001-01";

    fn service() -> RosterService {
        let config = ConfigLoader::load("./config/default").unwrap();
        let directory = Arc::new(config.directory());
        RosterService::new(
            Arc::new(InMemoryShiftStore::new()),
            directory.clone(),
            directory,
            config.settings().clone(),
        )
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn draft(employee_id: Option<&str>, date: &str) -> ShiftDraft {
        ShiftDraft {
            employee_id: employee_id.map(str::to_string),
            venue_id: VENUE.to_string(),
            work_area_id: None,
            date: make_date(date),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(17, 0, 0),
            is_rest_day: false,
            break_minutes: 0,
            role: None,
            notes: None,
            repeat: false,
        }
    }

    fn week() -> RosterFilter {
        RosterFilter::new(VENUE, DateRange::week_from(make_date("2024-06-10")).unwrap())
    }

    #[test]
    fn test_create_rejects_unknown_venue_and_employee() {
        let service = service();

        let mut bad_venue = draft(Some("emp_001"), "2024-06-10");
        bad_venue.venue_id = "VEN-9999".to_string();
        assert!(matches!(
            service.create_shift(bad_venue),
            Err(RosterError::VenueNotFound { .. })
        ));

        assert!(matches!(
            service.create_shift(draft(Some("emp_999"), "2024-06-10")),
            Err(RosterError::EmployeeNotFound { .. })
        ));

        let mut bad_area = draft(Some("emp_001"), "2024-06-10");
        bad_area.work_area_id = Some("WAI-0002-0001".to_string());
        match service.create_shift(bad_area) {
            Err(RosterError::Validation { field, .. }) => assert_eq!(field, "work_area_id"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_assign_open_shift_keeps_identifier() {
        let service = service();
        let open = service.create_shift(draft(None, "2024-06-11")).unwrap();

        let assigned = service
            .assign_open_shift(open.id, "emp_003", open.version)
            .unwrap();
        assert_eq!(assigned.id, open.id);
        assert_eq!(assigned.employee_id.as_deref(), Some("emp_003"));
        assert_eq!(assigned.version, open.version + 1);

        assert!(matches!(
            service.assign_open_shift(open.id, "emp_004", assigned.version),
            Err(RosterError::Validation { .. })
        ));
    }

    #[test]
    fn test_assign_into_busy_day_conflicts() {
        let service = service();
        let busy = service.create_shift(draft(Some("emp_001"), "2024-06-11")).unwrap();
        let open = service.create_shift(draft(None, "2024-06-11")).unwrap();

        match service.assign_open_shift(open.id, "emp_001", open.version) {
            Err(RosterError::Conflict { shift_id, .. }) => assert_eq!(shift_id, busy.id),
            other => panic!("Expected Conflict error, got {:?}", other),
        }
    }

    #[test]
    fn test_repeat_reports_each_date() {
        let service = service();
        let source = service.create_shift(draft(Some("emp_001"), "2024-06-10")).unwrap();
        let blocker = service.create_shift(draft(Some("emp_001"), "2024-06-24")).unwrap();

        let outcomes = service.repeat_shift(source.id, Some(3)).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_created());
        match &outcomes[1] {
            RepeatOutcome::Conflict {
                date,
                conflicting_shift_id,
                ..
            } => {
                assert_eq!(*date, make_date("2024-06-24"));
                assert_eq!(*conflicting_shift_id, blocker.id);
            }
            other => panic!("Expected Conflict outcome, got {:?}", other),
        }
        assert!(outcomes[2].is_created());
    }

    #[test]
    fn test_repeat_caps_weeks_at_configured_maximum() {
        let service = service();
        let source = service.create_shift(draft(None, "2024-06-10")).unwrap();

        let outcomes = service.repeat_shift(source.id, Some(100)).unwrap();
        assert_eq!(outcomes.len(), service.settings().repeat.max_weeks as usize);

        let outcomes = service.repeat_shift(source.id, None).unwrap();
        assert_eq!(outcomes.len(), service.settings().repeat.default_weeks as usize);
    }

    #[test]
    fn test_grid_and_open_shifts_exclude_cancelled() {
        let service = service();
        let assigned = service.create_shift(draft(Some("emp_001"), "2024-06-10")).unwrap();
        let open = service.create_shift(draft(None, "2024-06-12")).unwrap();

        service.cancel_shift(assigned.id, Some(assigned.version)).unwrap();
        service.cancel_shift(open.id, None).unwrap();

        let view = service.build_grid(week()).unwrap().view();
        assert!(
            view.rows
                .iter()
                .all(|row| row.cells.iter().all(|c| c.status == CellStatus::Empty))
        );
        let report = service.open_shifts(week()).unwrap();
        assert_eq!(report.total, 0);

        let audit = service.get_shift(assigned.id).unwrap();
        assert_eq!(audit.state, ShiftState::Cancelled);
    }

    #[test]
    fn test_grid_for_unknown_venue_fails_whole() {
        let service = service();
        let filter = RosterFilter::new("VEN-9999", DateRange::week_from(make_date("2024-06-10")).unwrap());
        assert!(matches!(
            service.build_grid(filter),
            Err(RosterError::VenueNotFound { .. })
        ));
    }

    #[test]
    fn test_financial_summary_for_week() {
        let service = service();
        // emp_001 at 30.00/hr for 8 hours
        let shift = service.create_shift(draft(Some("emp_001"), "2024-06-10")).unwrap();
        service.publish_shift(shift.id, shift.version).unwrap();
        // Draft alongside it: emp_003 at 30.00/hr for 8 hours
        service.create_shift(draft(Some("emp_003"), "2024-06-11")).unwrap();
        // Previous week, published
        let prior = service.create_shift(draft(Some("emp_003"), "2024-06-05")).unwrap();
        service.publish_shift(prior.id, prior.version).unwrap();

        let summary = service.financial_summary(&week()).unwrap();
        assert_eq!(summary.labour_cost, Decimal::new(24000, 2));
        assert_eq!(summary.draft_labour_cost, Decimal::new(24000, 2));
        assert_eq!(summary.prior_labour_cost, Decimal::new(24000, 2));
        assert_eq!(summary.venue_forecast, Some(Decimal::new(2500000, 2)));
        // 240 / 25000 * 100
        assert_eq!(
            summary.labour_cost_percentage,
            LabourCostPercentage::Defined(Decimal::new(96, 2))
        );
        assert!(!summary.approximate);
    }

    #[test]
    fn test_financial_summary_without_forecast_is_undefined() {
        let service = service();
        let filter =
            RosterFilter::new("VEN-0001-02", DateRange::week_from(make_date("2024-06-10")).unwrap());
        let summary = service.financial_summary(&filter).unwrap();
        assert_eq!(summary.labour_cost_percentage, LabourCostPercentage::Undefined);
    }

    #[test]
    fn test_resolve_range_defaults_to_one_week() {
        let service = service();
        let range = service
            .resolve_range(Some(make_date("2024-06-10")), None)
            .unwrap();
        assert_eq!(range.end(), make_date("2024-06-16"));

        assert!(matches!(
            service.resolve_range(Some(make_date("2024-06-10")), Some(make_date("2024-06-01"))),
            Err(RosterError::InvalidDateRange { .. })
        ));

        let current = service.resolve_range(None, None).unwrap();
        assert!(current.is_full_week());
    }

    #[test]
    fn test_resolve_range_rejects_ranges_over_the_limit() {
        let service = service();
        let max_days = i64::from(service.settings().max_range_days);
        let start = make_date("2024-06-10");

        let longest = start + Duration::days(max_days - 1);
        let range = service.resolve_range(Some(start), Some(longest)).unwrap();
        assert_eq!(range.len_days(), max_days);

        match service.resolve_range(Some(start), Some(longest + Duration::days(1))) {
            Err(RosterError::Validation { field, .. }) => assert_eq!(field, "end_date"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_range_rejects_week_past_last_date() {
        let service = service();
        let result = service.resolve_range(Some(NaiveDate::MAX - Duration::days(1)), None);
        match result {
            Err(RosterError::Validation { field, .. }) => assert_eq!(field, "start_date"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_financial_summary_at_first_date_is_rejected() {
        let service = service();
        let range = DateRange::new(NaiveDate::MIN, NaiveDate::MIN + Duration::days(6)).unwrap();
        let filter = RosterFilter::new(VENUE, range);
        assert!(matches!(
            service.financial_summary(&filter),
            Err(RosterError::Validation { .. })
        ));
    }

    #[test]
    fn test_repeat_past_last_date_is_rejected() {
        let service = service();
        let mut near_end = draft(Some("emp_001"), "2024-06-10");
        near_end.date = NaiveDate::MAX - Duration::days(10);
        let source = service.create_shift(near_end).unwrap();

        match service.repeat_shift(source.id, Some(4)) {
            Err(RosterError::Validation { field, .. }) => assert_eq!(field, "weeks"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
