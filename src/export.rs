//! Spreadsheet layout for export reports.
//!
//! The spreadsheet writer downstream of the engine expects a fixed table:
//! two header rows (a title row, then the column names) followed by one
//! row per exported record, always eight columns wide.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{ExportFilter, ExportRow, Report};

/// Column names of the export, in output order.
pub const EXPORT_COLUMNS: [&str; 8] = [
    "No.",
    "Volunteer ID",
    "Last Name",
    "First Name",
    "Date",
    "Check-in",
    "Check-out",
    "Hours",
];

/// A report laid out as spreadsheet cells.
///
/// # Example
///
/// ```
/// use volunteer_attendance::calculation::{ExportAssembler, reference_table};
/// use volunteer_attendance::export::ExportSheet;
/// use volunteer_attendance::models::{ExportFilter, VolunteerDirectory};
///
/// let directory = VolunteerDirectory::new();
/// let report = ExportAssembler::new(reference_table(), &directory)
///     .build_report(&[], &ExportFilter::default())
///     .unwrap();
///
/// let sheet = ExportSheet::from_report(&report, None);
/// assert_eq!(sheet.headers.len(), 2);
/// assert_eq!(sheet.headers[1][7], "Hours");
/// assert!(sheet.rows.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSheet {
    /// The two header rows: title, then column names.
    pub headers: Vec<Vec<String>>,
    /// One row per exported record.
    pub rows: Vec<Vec<String>>,
}

impl ExportSheet {
    /// Lays out `report` as a sheet.
    ///
    /// When `title` is `None` the title is derived from the report filter's
    /// date range.
    pub fn from_report(report: &Report, title: Option<&str>) -> Self {
        let title = title
            .map(str::to_string)
            .unwrap_or_else(|| default_title(&report.filter));

        let mut title_row = vec![String::new(); EXPORT_COLUMNS.len()];
        title_row[0] = title;
        let column_row = EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect();

        Self {
            headers: vec![title_row, column_row],
            rows: report.rows.iter().map(format_row).collect(),
        }
    }

    /// Returns the number of columns (always eight).
    pub fn column_count(&self) -> usize {
        EXPORT_COLUMNS.len()
    }

    /// Returns the total number of rows, headers included.
    pub fn row_count(&self) -> usize {
        self.headers.len() + self.rows.len()
    }
}

fn default_title(filter: &ExportFilter) -> String {
    match (filter.start_date, filter.end_date) {
        (Some(start), Some(end)) => format!("Volunteer attendance {} to {}", start, end),
        (Some(start), None) => format!("Volunteer attendance from {}", start),
        (None, Some(end)) => format!("Volunteer attendance through {}", end),
        (None, None) => "Volunteer attendance".to_string(),
    }
}

fn format_row(row: &ExportRow) -> Vec<String> {
    vec![
        row.index.to_string(),
        row.volunteer_id.clone(),
        row.last_name.clone(),
        row.first_name.clone(),
        row.date.format("%Y-%m-%d").to_string(),
        format_time(row.check_in, row),
        format_time(row.check_out, row),
        format_hours(row.hours_worked),
    ]
}

/// Times on the row's date print as `HH:MM`; anything else keeps its date.
fn format_time(timestamp: NaiveDateTime, row: &ExportRow) -> String {
    if timestamp.date() == row.date {
        timestamp.format("%H:%M").to_string()
    } else {
        timestamp.format("%Y-%m-%d %H:%M").to_string()
    }
}

fn format_hours(hours: Decimal) -> String {
    hours
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}
