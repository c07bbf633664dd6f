//! Calculation logic for the volunteer attendance engine.
//!
//! This module contains the attendance tier table and its default-fallback
//! resolver, the clamped hours calculator, and the export assembler that
//! combines both into ordered report rows.

mod export_assembler;
mod hours;
mod tier_table;

pub use export_assembler::{
    ExportAssembler, WARNING_INVALID_TIME_RANGE, WARNING_UNKNOWN_VOLUNTEER,
};
pub use hours::{DEFAULT_MAX_HOURS, compute_hours, elapsed_hours};
pub use tier_table::{DEFAULT_TIER, TierTable, reference_table};
