//! Core data models for the volunteer attendance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod record;
mod report;
mod tier;
mod volunteer;

pub use record::AttendanceRecord;
pub use report::{
    ExportFilter, ExportRow, ExportWarning, InvalidRangePolicy, Report, ReportSummary,
};
pub use tier::AttendanceTier;
pub use volunteer::{Volunteer, VolunteerDirectory};
