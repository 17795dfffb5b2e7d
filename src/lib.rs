//! Staff roster scheduling engine.
//!
//! This crate represents a venue's weekly work schedule as a grid of
//! employees × days, places shifts and rest days into that grid under a
//! one-shift-per-employee-per-day rule, tracks unassigned shifts, and computes
//! labour cost against the venue's revenue forecast.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod roster;
pub mod service;
pub mod store;
