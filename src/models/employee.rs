//! Employee and pay rate models.
//!
//! Employees come from the employee roster feed. The roster engine reads them,
//! including their pay rate, but never modifies them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Name shown for a roster row whose employee is missing from the feed.
pub const UNKNOWN_EMPLOYEE_NAME: &str = "Unknown Employee";

/// An employee's pay rate, expressed in whichever period payroll stores it.
///
/// Usually only one field is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRate {
    /// Explicit hourly rate.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Pay per fortnight.
    #[serde(default)]
    pub fortnight_rate: Option<Decimal>,
    /// Pay per calendar month.
    #[serde(default)]
    pub monthly_rate: Option<Decimal>,
    /// Pay per year.
    #[serde(default)]
    pub per_annum_rate: Option<Decimal>,
}

impl PayRate {
    /// Returns true if no rate of any period is populated.
    pub fn is_empty(&self) -> bool {
        self.hourly_rate.is_none()
            && self.fortnight_rate.is_none()
            && self.monthly_rate.is_none()
            && self.per_annum_rate.is_none()
    }
}

/// An employee available for rostering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Linking identifier referenced by shift records.
    pub id: String,
    /// Legal first name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Preferred first name, shown instead of the legal one when present.
    #[serde(default)]
    pub preferred_name: Option<String>,
    /// Job role (e.g., "Bartender").
    #[serde(default)]
    pub role: Option<String>,
    /// The venue the employee works at.
    pub venue_id: String,
    /// The employee's usual work area.
    #[serde(default)]
    pub work_area_id: Option<String>,
    /// The employee's pay rate.
    #[serde(default)]
    pub pay_rate: PayRate,
}

impl Employee {
    /// Returns the name used on the roster.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{Employee, PayRate};
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: "Margaret".to_string(),
    ///     last_name: "Nguyen".to_string(),
    ///     preferred_name: Some("Maggie".to_string()),
    ///     role: None,
    ///     venue_id: "VEN-0001-01".to_string(),
    ///     work_area_id: None,
    ///     pay_rate: PayRate::default(),
    /// };
    /// assert_eq!(employee.display_name(), "Maggie Nguyen");
    /// ```
    pub fn display_name(&self) -> String {
        let first = self
            .preferred_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.first_name);
        format!("{} {}", first, self.last_name).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            first_name: "Margaret".to_string(),
            last_name: "Nguyen".to_string(),
            preferred_name: None,
            role: Some("Bartender".to_string()),
            venue_id: "VEN-0001-01".to_string(),
            work_area_id: Some("WAI-0001-0001".to_string()),
            pay_rate: PayRate::default(),
        }
    }

    #[test]
    fn test_display_name_uses_first_name_without_preferred() {
        let employee = create_test_employee();
        assert_eq!(employee.display_name(), "Margaret Nguyen");
    }

    #[test]
    fn test_display_name_ignores_blank_preferred_name() {
        let mut employee = create_test_employee();
        employee.preferred_name = Some("  ".to_string());
        assert_eq!(employee.display_name(), "Margaret Nguyen");
    }

    #[test]
    fn test_display_name_trims_missing_last_name() {
        let mut employee = create_test_employee();
        employee.last_name = String::new();
        assert_eq!(employee.display_name(), "Margaret");
    }

    #[test]
    fn test_deserialize_employee_with_annual_rate() {
        let json = r#"{
            "id": "emp_002",
            "first_name": "Tom",
            "last_name": "Hale",
            "venue_id": "VEN-0001-01",
            "pay_rate": { "per_annum_rate": "65000" }
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.pay_rate.per_annum_rate, Some(Decimal::new(65000, 0)));
        assert!(employee.pay_rate.hourly_rate.is_none());
        assert!(employee.work_area_id.is_none());
    }

    #[test]
    fn test_pay_rate_is_empty() {
        assert!(PayRate::default().is_empty());
        let rate = PayRate {
            fortnight_rate: Some(Decimal::new(2280, 0)),
            ..PayRate::default()
        };
        assert!(!rate.is_empty());
    }
}
