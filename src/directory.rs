//! Collaborator feeds consumed by the roster engine.
//!
//! The employee directory and the venue catalog live outside this crate. They
//! are reached through the [`EmployeeDirectory`] and [`VenueCatalog`] traits so
//! a failed fetch surfaces as an error instead of an empty roster.

use std::collections::HashMap;

use crate::error::RosterResult;
use crate::models::{Employee, Venue};

/// Read access to the employee roster feed.
pub trait EmployeeDirectory: Send + Sync {
    /// Employees working at `venue_id`, in no particular order.
    fn employees_for_venue(&self, venue_id: &str) -> RosterResult<Vec<Employee>>;

    /// A single employee by linking identifier.
    fn employee(&self, employee_id: &str) -> RosterResult<Option<Employee>>;
}

/// Read access to the venue/work-area catalog.
pub trait VenueCatalog: Send + Sync {
    /// A venue by identifier.
    fn venue(&self, venue_id: &str) -> RosterResult<Option<Venue>>;
}

/// Directory and catalog held in memory, typically loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    venues: HashMap<String, Venue>,
    employees: HashMap<String, Employee>,
}

impl StaticDirectory {
    /// Builds a directory from venue and employee lists.
    pub fn new(venues: Vec<Venue>, employees: Vec<Employee>) -> Self {
        Self {
            venues: venues.into_iter().map(|v| (v.id.clone(), v)).collect(),
            employees: employees.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }
}

impl EmployeeDirectory for StaticDirectory {
    fn employees_for_venue(&self, venue_id: &str) -> RosterResult<Vec<Employee>> {
        Ok(self
            .employees
            .values()
            .filter(|e| e.venue_id == venue_id)
            .cloned()
            .collect())
    }

    fn employee(&self, employee_id: &str) -> RosterResult<Option<Employee>> {
        Ok(self.employees.get(employee_id).cloned())
    }
}

impl VenueCatalog for StaticDirectory {
    fn venue(&self, venue_id: &str) -> RosterResult<Option<Venue>> {
        Ok(self.venues.get(venue_id).cloned())
    }
}
