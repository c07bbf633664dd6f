//! Response types for the attendance API.
//!
//! This module defines the success bodies of each endpoint, the error
//! response structure, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::export::ExportSheet;
use crate::models::{AttendanceTier, Report};

/// Response body for `GET /tiers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierListResponse {
    /// The tier returned for unknown tier numbers.
    pub default_tier: u32,
    /// All tiers ordered by tier number.
    pub tiers: Vec<AttendanceTier>,
}

/// Response body for `GET /tiers/:tier`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierResponse {
    /// The tier number that was asked for.
    pub requested: i64,
    /// True if the requested tier was not defined and the default was returned.
    pub fallback: bool,
    /// The resolved tier.
    pub tier: AttendanceTier,
}

/// Response body for `POST /hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursResponse {
    /// Hours credited, clamped to `max_hours`.
    pub hours: Decimal,
    /// Unclamped elapsed hours.
    pub elapsed_hours: Decimal,
    /// The ceiling in force.
    pub max_hours: Decimal,
    /// True if the elapsed hours exceeded the ceiling.
    pub clamped: bool,
}

/// Response body for `POST /export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    /// The assembled report.
    pub report: Report,
    /// The report laid out for the spreadsheet writer.
    pub sheet: ExportSheet,
}

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
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid configuration", message),
            },
            err @ EngineError::InvalidTimeRange { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_TIME_RANGE",
                    err.to_string(),
                    "Check-out must not precede check-in",
                ),
            },
        }
    }
}
