//! HTTP API module for the roster engine.
//!
//! This module provides the REST endpoints for editing shifts and reading the
//! weekly roster, open shifts and financial summary.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssignShiftRequest, CancelShiftQuery, PublishShiftRequest, RepeatShiftRequest, RosterQuery,
    UpdateShiftRequest,
};
pub use response::{ApiError, ApiErrorResponse, RepeatResponse};
pub use state::AppState;
