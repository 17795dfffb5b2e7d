//! Configuration loading and management for the roster engine.
//!
//! This module loads engine settings, the venue catalog and the employee feed
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} venues", config.venues().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EmployeesConfig, RepeatSettings, RosterSettings, StandardHours, VenuesConfig};
