//! HTTP request handlers for the roster API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::RosterError;
use crate::models::ShiftDraft;
use crate::roster::RosterFilter;

use super::request::{
    AssignShiftRequest, CancelShiftQuery, PublishShiftRequest, RepeatShiftRequest, RosterQuery,
    UpdateShiftRequest,
};
use super::response::{ApiError, ApiErrorResponse, RepeatResponse};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/roster", get(roster_handler))
        .route("/shifts", get(list_shifts_handler).post(create_shift_handler))
        .route(
            "/shifts/:id",
            get(get_shift_handler)
                .put(update_shift_handler)
                .delete(cancel_shift_handler),
        )
        .route("/shifts/:id/publish", post(publish_shift_handler))
        .route("/shifts/:id/assign", post(assign_shift_handler))
        .route("/shifts/:id/repeat", post(repeat_shift_handler))
        .route("/open-shifts", get(open_shifts_handler))
        .route("/financial-summary", get(financial_summary_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn json_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn query_error(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Query string error");
    ApiErrorResponse::bad_request(ApiError::invalid_query(body_text))
}

fn path_error(correlation_id: Uuid, rejection: PathRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid shift id");
    ApiErrorResponse::bad_request(ApiError::new("INVALID_SHIFT_ID", body_text))
}

fn reject(correlation_id: Uuid, err: RosterError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        conflict = err.is_conflict(),
        "Request rejected"
    );
    err.into()
}

fn roster_filter(
    state: &AppState,
    correlation_id: Uuid,
    query: Result<Query<RosterQuery>, QueryRejection>,
) -> Result<RosterFilter, ApiErrorResponse> {
    let Query(query) = query.map_err(|r| query_error(correlation_id, r))?;
    let range = state
        .service()
        .resolve_range(query.start_date, query.end_date)
        .map_err(|e| reject(correlation_id, e))?;
    Ok(query.into_filter(range))
}

/// Handler for GET /roster: the weekly grid.
async fn roster_handler(
    State(state): State<AppState>,
    query: Result<Query<RosterQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing roster request");

    let filter = roster_filter(&state, correlation_id, query)?;
    let start_time = Instant::now();
    let grid = state
        .service()
        .build_grid(filter)
        .map_err(|e| reject(correlation_id, e))?;
    let view = grid.view();

    info!(
        correlation_id = %correlation_id,
        venue_id = %view.venue_id,
        rows = view.rows.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Roster grid built"
    );
    Ok(json_response(StatusCode::OK, view))
}

/// Handler for GET /shifts: filtered listing.
async fn list_shifts_handler(
    State(state): State<AppState>,
    query: Result<Query<RosterQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let filter = roster_filter(&state, correlation_id, query)?;
    let shifts = state
        .service()
        .list_shifts(&filter)
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        venue_id = %filter.venue_id,
        shifts_count = shifts.len(),
        "Shifts listed"
    );
    Ok(json_response(StatusCode::OK, shifts))
}

/// Handler for POST /shifts.
async fn create_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftDraft>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create shift request");

    let Json(draft) = payload.map_err(|r| json_error(correlation_id, r))?;
    let shift = state
        .service()
        .create_shift(draft)
        .map_err(|e| reject(correlation_id, e))?;
    Ok(json_response(StatusCode::CREATED, shift))
}

/// Handler for GET /shifts/{id}.
async fn get_shift_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(id) = id.map_err(|r| path_error(correlation_id, r))?;
    let shift = state
        .service()
        .get_shift(id)
        .map_err(|e| reject(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, shift))
}

/// Handler for PUT /shifts/{id}.
async fn update_shift_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateShiftRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing update shift request");

    let Path(id) = id.map_err(|r| path_error(correlation_id, r))?;
    let Json(request) = payload.map_err(|r| json_error(correlation_id, r))?;
    let shift = state
        .service()
        .update_shift(id, request.version, request.shift)
        .map_err(|e| reject(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, shift))
}

/// Handler for DELETE /shifts/{id}: cancels the shift.
async fn cancel_shift_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<CancelShiftQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(id) = id.map_err(|r| path_error(correlation_id, r))?;
    let Query(query) = query.map_err(|r| query_error(correlation_id, r))?;
    let shift = state
        .service()
        .cancel_shift(id, query.version)
        .map_err(|e| reject(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, shift))
}

/// Handler for POST /shifts/{id}/publish.
async fn publish_shift_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PublishShiftRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(id) = id.map_err(|r| path_error(correlation_id, r))?;
    let Json(request) = payload.map_err(|r| json_error(correlation_id, r))?;
    let shift = state
        .service()
        .publish_shift(id, request.version)
        .map_err(|e| reject(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, shift))
}

/// Handler for POST /shifts/{id}/assign: fills an open shift.
async fn assign_shift_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AssignShiftRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(id) = id.map_err(|r| path_error(correlation_id, r))?;
    let Json(request) = payload.map_err(|r| json_error(correlation_id, r))?;
    let shift = state
        .service()
        .assign_open_shift(id, &request.employee_id, request.version)
        .map_err(|e| reject(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, shift))
}

/// Handler for POST /shifts/{id}/repeat.
///
/// The body is optional; without one the configured default week count is used.
async fn repeat_shift_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RepeatShiftRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(id) = id.map_err(|r| path_error(correlation_id, r))?;
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => RepeatShiftRequest::default(),
        Err(rejection) => return Err(json_error(correlation_id, rejection)),
    };

    let results = state
        .service()
        .repeat_shift(id, request.weeks)
        .map_err(|e| reject(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, RepeatResponse::new(id, results)))
}

/// Handler for GET /open-shifts.
async fn open_shifts_handler(
    State(state): State<AppState>,
    query: Result<Query<RosterQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let filter = roster_filter(&state, correlation_id, query)?;
    let report = state
        .service()
        .open_shifts(filter)
        .map_err(|e| reject(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, report))
}

/// Handler for GET /financial-summary.
async fn financial_summary_handler(
    State(state): State<AppState>,
    query: Result<Query<RosterQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing financial summary request");

    let filter = roster_filter(&state, correlation_id, query)?;
    let summary = state
        .service()
        .financial_summary(&filter)
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        venue_id = %summary.venue_id,
        labour_cost = %summary.labour_cost,
        draft_labour_cost = %summary.draft_labour_cost,
        "Financial summary computed"
    );
    Ok(json_response(StatusCode::OK, summary))
}
