//! Venue and work area catalog models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A work area within a venue (e.g., bar, kitchen).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkArea {
    /// Work area identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Historical average hourly rate, used to estimate open shift cost.
    #[serde(default)]
    pub average_hourly_rate: Option<Decimal>,
}

/// A venue and its work areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// Venue identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Forecast revenue for a week.
    #[serde(default)]
    pub weekly_forecast: Option<Decimal>,
    /// Current account balance reported by the finance system.
    #[serde(default)]
    pub account_balance: Option<Decimal>,
    /// Work areas at this venue.
    #[serde(default)]
    pub work_areas: Vec<WorkArea>,
}

impl Venue {
    /// Looks up a work area by identifier.
    pub fn work_area(&self, id: &str) -> Option<&WorkArea> {
        self.work_areas.iter().find(|area| area.id == id)
    }
}
