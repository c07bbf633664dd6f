//! HTTP request handlers for the attendance API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ExportAssembler, elapsed_hours};
use crate::export::ExportSheet;
use crate::models::VolunteerDirectory;

use super::request::{ExportRequest, HoursRequest};
use super::response::{
    ApiError, ApiErrorResponse, ExportResponse, HoursResponse, TierListResponse, TierResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tiers", get(list_tiers_handler))
        .route("/tiers/:tier", get(get_tier_handler))
        .route("/hours", post(hours_handler))
        .route("/export", post(export_handler))
        .with_state(state)
}

/// Turns a JSON extraction failure into a 400 response.
fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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

    ApiErrorResponse::bad_request(error).into_response()
}

/// Handler for GET /tiers.
async fn list_tiers_handler(State(state): State<AppState>) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let table = state.config().tier_table();
    info!(
        correlation_id = %correlation_id,
        tiers = table.len(),
        default_tier = table.default_tier().tier,
        "Tier table listed"
    );

    Json(TierListResponse {
        default_tier: table.default_tier().tier,
        tiers: table.tiers().to_vec(),
    })
}

/// Handler for GET /tiers/:tier.
///
/// Never 404s: unknown tier numbers resolve to the default tier. A segment
/// that is not an integer gets a `VALIDATION_ERROR` body.
async fn get_tier_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let requested = match path {
        Ok(Path(requested)) => requested,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Invalid tier path"
            );
            return ApiErrorResponse::bad_request(ApiError::validation_error(format!(
                "Tier must be an integer: {}",
                body_text
            )))
            .into_response();
        }
    };

    let table = state.config().tier_table();
    let fallback = !table.contains(requested);
    let tier = table.resolve(requested).clone();
    info!(
        correlation_id = %correlation_id,
        requested,
        resolved = tier.tier,
        fallback,
        "Tier resolved"
    );

    Json(TierResponse {
        requested,
        fallback,
        tier,
    })
    .into_response()
}

/// Handler for POST /hours.
async fn hours_handler(
    State(state): State<AppState>,
    payload: Result<Json<HoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let result = elapsed_hours(request.check_in, request.check_out).and_then(|elapsed| {
        config
            .compute_hours(request.check_in, request.check_out)
            .map(|hours| (elapsed, hours))
    });

    match result {
        Ok((elapsed, hours)) => {
            let clamped = elapsed > hours;
            info!(
                correlation_id = %correlation_id,
                hours = %hours.normalize(),
                clamped,
                "Hours calculated"
            );
            (
                StatusCode::OK,
                Json(HoursResponse {
                    hours,
                    elapsed_hours: elapsed,
                    max_hours: config.max_hours(),
                    clamped,
                }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Hours calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /export.
///
/// Assembles the report and lays it out as a sheet for the spreadsheet writer.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let directory: VolunteerDirectory = request.volunteers.into_iter().collect();
    let assembler = ExportAssembler::new(config.tier_table(), &directory)
        .with_max_hours(config.max_hours())
        .with_policy(request.on_invalid_range);

    let start_time = Instant::now();
    match assembler.build_report(&request.records, &request.filter) {
        Ok(report) => {
            let sheet = ExportSheet::from_report(&report, request.title.as_deref());
            info!(
                correlation_id = %correlation_id,
                report_id = %report.report_id,
                rows = report.rows.len(),
                warnings = report.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Export completed successfully"
            );
            (StatusCode::OK, Json(ExportResponse { report, sheet })).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Export failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}
