//! Attendance record model.
//!
//! Records are produced by the check-in/check-out subsystem and consumed
//! read-only by the export pipeline.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One check-in/check-out pair for a volunteer on a given date.
///
/// # Example
///
/// ```
/// use volunteer_attendance::models::AttendanceRecord;
///
/// let json = r#"{
///     "volunteer_id": "vol_001",
///     "date": "2026-03-02",
///     "check_in": "2026-03-02T09:00:00",
///     "check_out": "2026-03-02T17:00:00"
/// }"#;
/// let record: AttendanceRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.tier, None);
/// assert_eq!(record.activity, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The volunteer this record belongs to.
    pub volunteer_id: String,
    /// The attendance date (used for filtering and ordering).
    pub date: NaiveDate,
    /// When the volunteer checked in.
    pub check_in: NaiveDateTime,
    /// When the volunteer checked out.
    pub check_out: NaiveDateTime,
    /// The attendance tier this record was logged against, if any.
    #[serde(default)]
    pub tier: Option<i64>,
    /// The activity the volunteer attended, if any.
    #[serde(default)]
    pub activity: Option<String>,
}
