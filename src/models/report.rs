//! Export report models.
//!
//! This module contains the [`Report`] type and its associated structures
//! that capture the output of an export: the selection filter, the ordered
//! rows, summary totals and any warnings raised while assembling them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AttendanceRecord, AttendanceTier};

/// Selection criteria for an export.
///
/// Dates are inclusive. An empty `volunteer_ids` list selects every
/// volunteer. Activity matching ignores case and surrounding whitespace.
///
/// # Example
///
/// ```
/// use volunteer_attendance::models::ExportFilter;
/// use chrono::NaiveDate;
///
/// let filter = ExportFilter {
///     start_date: NaiveDate::from_ymd_opt(2026, 3, 1),
///     end_date: NaiveDate::from_ymd_opt(2026, 3, 31),
///     ..ExportFilter::default()
/// };
/// assert!(filter.contains_date(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
/// assert!(!filter.contains_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFilter {
    /// First date to include.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last date to include.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Volunteers to include; empty means all.
    #[serde(default)]
    pub volunteer_ids: Vec<String>,
    /// Activity to include; `None` means all.
    #[serde(default)]
    pub activity: Option<String>,
}

impl ExportFilter {
    /// Returns true if `date` falls within the filter's date range.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }

    /// Returns true if the record passes every criterion of the filter.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        if !self.contains_date(record.date) {
            return false;
        }

        if !self.volunteer_ids.is_empty()
            && !self.volunteer_ids.iter().any(|id| *id == record.volunteer_id)
        {
            return false;
        }

        match &self.activity {
            Some(wanted) => record
                .activity
                .as_deref()
                .is_some_and(|activity| {
                    activity.trim().to_lowercase() == wanted.trim().to_lowercase()
                }),
            None => true,
        }
    }
}

/// What the export does with a record whose check-out precedes its check-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRangePolicy {
    /// Stop the export and return the error.
    #[default]
    Abort,
    /// Drop the record and report a warning.
    Skip,
}

/// A single row of an export, in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// 1-based position of the row in the export.
    pub index: usize,
    /// The volunteer's id.
    pub volunteer_id: String,
    /// The volunteer's given name (empty if unknown).
    pub first_name: String,
    /// The volunteer's family name (empty if unknown).
    pub last_name: String,
    /// The activity attended, if recorded.
    pub activity: Option<String>,
    /// The attendance date.
    pub date: NaiveDate,
    /// Check-in timestamp.
    pub check_in: NaiveDateTime,
    /// Check-out timestamp.
    pub check_out: NaiveDateTime,
    /// Hours worked, clamped to the configured maximum.
    pub hours_worked: Decimal,
    /// The tier the record was logged against, resolved with default fallback.
    pub tier: Option<AttendanceTier>,
    /// Whether `hours_worked` reached the tier's required hours.
    pub tier_met: Option<bool>,
}

/// Aggregated totals for an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Records supplied to the export.
    pub total_records: usize,
    /// Records that passed the filter.
    pub matched_records: usize,
    /// Rows in the report.
    pub exported_rows: usize,
    /// Matched records dropped under [`InvalidRangePolicy::Skip`].
    pub skipped_records: usize,
    /// Sum of `hours_worked` over all rows.
    pub total_hours: Decimal,
}

/// A non-fatal problem found while assembling an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The volunteer the warning concerns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volunteer_id: Option<String>,
    /// The attendance date the warning concerns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// The complete result of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier for this export.
    pub report_id: Uuid,
    /// When the export was assembled.
    pub generated_at: DateTime<Utc>,
    /// The filter the export was assembled with.
    pub filter: ExportFilter,
    /// Rows ordered by date, then volunteer name.
    pub rows: Vec<ExportRow>,
    /// Totals over the rows.
    pub summary: ReportSummary,
    /// Non-fatal problems encountered.
    pub warnings: Vec<ExportWarning>,
}

impl Report {
    /// Returns true if the report has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
