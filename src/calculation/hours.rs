//! Hours calculation functionality.
//!
//! This module computes the hours a volunteer worked between check-in and
//! check-out, clamped to a configured daily ceiling.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Default ceiling on the hours credited for a single attendance record.
pub const DEFAULT_MAX_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Returns the unclamped time between check-in and check-out, in hours.
///
/// Elapsed time is measured in whole minutes; leftover seconds are dropped.
///
/// # Errors
///
/// Returns `InvalidTimeRange` if `check_out` precedes `check_in`.
pub fn elapsed_hours(check_in: NaiveDateTime, check_out: NaiveDateTime) -> EngineResult<Decimal> {
    if check_out < check_in {
        return Err(EngineError::InvalidTimeRange {
            check_in,
            check_out,
        });
    }

    let minutes = (check_out - check_in).num_minutes();
    Ok(Decimal::from(minutes) / MINUTES_PER_HOUR)
}

/// Computes hours worked, clamped to `max_hours`.
///
/// The result is `min(max_hours, check_out - check_in)` and always lies in
/// `[0, max_hours]`. Check-outs on a later date than the check-in are valid.
///
/// # Arguments
///
/// * `check_in` - When the volunteer checked in
/// * `check_out` - When the volunteer checked out
/// * `max_hours` - The ceiling (typically [`DEFAULT_MAX_HOURS`])
///
/// # Errors
///
/// - `InvalidTimeRange` if `check_out` precedes `check_in`
/// - `InvalidConfig` if `max_hours` is negative
///
/// # Examples
///
/// ```
/// use volunteer_attendance::calculation::{compute_hours, DEFAULT_MAX_HOURS};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let check_in = NaiveDateTime::parse_from_str("2026-03-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let check_out = NaiveDateTime::parse_from_str("2026-03-02 21:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let hours = compute_hours(check_in, check_out, DEFAULT_MAX_HOURS).unwrap();
/// assert_eq!(hours, Decimal::new(8, 0));
/// ```
pub fn compute_hours(
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    max_hours: Decimal,
) -> EngineResult<Decimal> {
    if max_hours < Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            message: format!("maximum hours must not be negative, got {}", max_hours),
        });
    }

    let elapsed = elapsed_hours(check_in, check_out)?;
    if elapsed > max_hours {
        debug!(
            elapsed = %elapsed.normalize(),
            max_hours = %max_hours.normalize(),
            "Clamping hours to maximum"
        );
        return Ok(max_hours);
    }

    Ok(elapsed)
}
