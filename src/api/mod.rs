//! HTTP API module for the volunteer attendance engine.
//!
//! This module provides the REST endpoints for tier lookup, hours
//! calculation and attendance export.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ExportRequest, HoursRequest};
pub use response::{
    ApiError, ApiErrorResponse, ExportResponse, HoursResponse, TierListResponse, TierResponse,
};
pub use state::AppState;
