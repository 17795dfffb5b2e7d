//! Configuration types for the roster engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{Employee, Venue};

/// Standard working hours used to turn periodic pay into an hourly rate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StandardHours {
    /// Ordinary hours in a week.
    #[serde(default = "default_weekly_hours")]
    pub weekly: Decimal,
    /// Ordinary hours in a calendar month.
    #[serde(default = "default_monthly_hours")]
    pub monthly: Decimal,
}

impl Default for StandardHours {
    fn default() -> Self {
        Self {
            weekly: default_weekly_hours(),
            monthly: default_monthly_hours(),
        }
    }
}

fn default_weekly_hours() -> Decimal {
    Decimal::new(38, 0)
}

fn default_monthly_hours() -> Decimal {
    Decimal::new(16467, 2)
}

/// Limits for repeat forward-fill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepeatSettings {
    /// Weeks filled when the caller does not say.
    #[serde(default = "default_repeat_weeks")]
    pub default_weeks: u32,
    /// Upper bound on weeks filled in one request.
    #[serde(default = "default_max_repeat_weeks")]
    pub max_weeks: u32,
}

impl Default for RepeatSettings {
    fn default() -> Self {
        Self {
            default_weeks: default_repeat_weeks(),
            max_weeks: default_max_repeat_weeks(),
        }
    }
}

fn default_repeat_weeks() -> u32 {
    4
}

fn default_max_repeat_weeks() -> u32 {
    12
}

/// Engine settings from roster.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterSettings {
    /// Standard hours for rate derivation.
    #[serde(default)]
    pub standard_hours: StandardHours,
    /// Repeat forward-fill limits.
    #[serde(default)]
    pub repeat: RepeatSettings,
    /// First day of the weekly view.
    #[serde(default = "default_week_start")]
    pub week_starts_on: Weekday,
    /// Longest date range a roster or summary query may span, in days.
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            standard_hours: StandardHours::default(),
            repeat: RepeatSettings::default(),
            week_starts_on: default_week_start(),
            max_range_days: default_max_range_days(),
        }
    }
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

fn default_max_range_days() -> u32 {
    93
}

/// Venue catalog file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct VenuesConfig {
    /// All venues and their work areas.
    pub venues: Vec<Venue>,
}

/// Employee roster feed file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// All employees across venues.
    pub employees: Vec<Employee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings: RosterSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, RosterSettings::default());
        assert_eq!(settings.standard_hours.weekly, Decimal::new(38, 0));
        assert_eq!(settings.standard_hours.monthly, Decimal::new(16467, 2));
        assert_eq!(settings.week_starts_on, Weekday::Mon);
        assert_eq!(settings.max_range_days, 93);
    }

    #[test]
    fn test_partial_settings() {
        let yaml = r#"
standard_hours:
  weekly: "40"
repeat:
  max_weeks: 8
week_starts_on: Sunday
max_range_days: 31
"#;
        let settings: RosterSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.standard_hours.weekly, Decimal::new(40, 0));
        assert_eq!(settings.standard_hours.monthly, Decimal::new(16467, 2));
        assert_eq!(settings.repeat.default_weeks, 4);
        assert_eq!(settings.repeat.max_weeks, 8);
        assert_eq!(settings.week_starts_on, Weekday::Sun);
        assert_eq!(settings.max_range_days, 31);
    }
}
