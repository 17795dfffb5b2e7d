//! Response types for the roster API.
//!
//! This module defines the error response structures, the mapping from
//! [`RosterError`] to HTTP status codes, and the response bodies that are not
//! plain domain types.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RosterError;
use crate::roster::RepeatOutcome;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// The field at fault, for validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// The shift that caused a conflict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_shift_id: Option<Uuid>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            field: None,
            conflicting_shift_id: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a malformed query string error response.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new("INVALID_QUERY", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<RosterError> for ApiErrorResponse {
    fn from(error: RosterError) -> Self {
        let message = error.to_string();
        match error {
            RosterError::Validation { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError {
                    field: Some(field),
                    ..ApiError::new("VALIDATION_ERROR", message)
                },
            },
            RosterError::InvalidDateRange { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_DATE_RANGE", message),
            },
            RosterError::Conflict { shift_id, .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError {
                    conflicting_shift_id: Some(shift_id),
                    ..ApiError::new("SHIFT_CONFLICT", message)
                },
            },
            RosterError::StaleVersion { shift_id, .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError {
                    conflicting_shift_id: Some(shift_id),
                    ..ApiError::with_details(
                        "STALE_VERSION",
                        message,
                        "Reload the shift and retry with its current version",
                    )
                },
            },
            RosterError::InvalidTransition { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("INVALID_TRANSITION", message),
            },
            RosterError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("SHIFT_NOT_FOUND", message),
            },
            RosterError::VenueNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("VENUE_NOT_FOUND", message),
            },
            RosterError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            RosterError::ConfigNotFound { .. } | RosterError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            RosterError::Store { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORE_ERROR", "Shift store unavailable", message),
            },
        }
    }
}

/// Body returned by `POST /shifts/{id}/repeat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatResponse {
    /// The shift that was repeated.
    pub source_shift_id: Uuid,
    /// Number of copies written.
    pub created: usize,
    /// One entry per target date, in date order.
    pub results: Vec<RepeatOutcome>,
}

impl RepeatResponse {
    /// Wraps the per-date outcomes of a repeat.
    pub fn new(source_shift_id: Uuid, results: Vec<RepeatOutcome>) -> Self {
        Self {
            source_shift_id,
            created: results.iter().filter(|r| r.is_created()).count(),
            results,
        }
    }
}
