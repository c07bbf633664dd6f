//! Request types for the attendance API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, ExportFilter, InvalidRangePolicy, Volunteer};

/// Request body for the `/export` endpoint.
///
/// Every field is optional; an empty body exports nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Volunteer identities to join onto the records.
    #[serde(default)]
    pub volunteers: Vec<Volunteer>,
    /// The attendance records to export.
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    /// Selection criteria.
    #[serde(default)]
    pub filter: ExportFilter,
    /// What to do with records whose check-out precedes check-in.
    #[serde(default)]
    pub on_invalid_range: InvalidRangePolicy,
    /// Title for the sheet's first header row.
    #[serde(default)]
    pub title: Option<String>,
}

/// Request body for the `/hours` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursRequest {
    /// When the volunteer checked in.
    pub check_in: NaiveDateTime,
    /// When the volunteer checked out.
    pub check_out: NaiveDateTime,
}
