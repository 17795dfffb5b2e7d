//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading roster settings,
//! the venue catalog and the employee feed from YAML files.

use std::fs;
use std::path::Path;

use crate::directory::StaticDirectory;
use crate::error::{RosterError, RosterResult};
use crate::models::{Employee, Venue};

use super::types::{EmployeesConfig, RosterSettings, VenuesConfig};

/// Loads and provides access to roster configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── roster.yaml     # Standard hours, repeat limits, week start
/// ├── venues.yaml     # Venue and work area catalog
/// └── employees.yaml  # Employee roster feed
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Weekly hours: {}", loader.settings().standard_hours.weekly);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: RosterSettings,
    venues: Vec<Venue>,
    employees: Vec<Employee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> RosterResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<RosterSettings>(&path.join("roster.yaml"))?;
        let venues = Self::load_yaml::<VenuesConfig>(&path.join("venues.yaml"))?.venues;
        let employees = Self::load_yaml::<EmployeesConfig>(&path.join("employees.yaml"))?.employees;

        tracing::debug!(
            path = %path.display(),
            venues = venues.len(),
            employees = employees.len(),
            "Loaded roster configuration"
        );

        Ok(Self {
            settings,
            venues,
            employees,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> RosterResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| RosterError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| RosterError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &RosterSettings {
        &self.settings
    }

    /// Returns the venue catalog.
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Returns the employee feed.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Builds an in-memory directory over the loaded venues and employees.
    pub fn directory(&self) -> StaticDirectory {
        StaticDirectory::new(self.venues.clone(), self.employees.clone())
    }
}
