//! Attendance tier model.
//!
//! A tier is a named attendance threshold: the hours a volunteer must put in
//! on a day, together with the check-in/check-out window expected for it.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single attendance tier.
///
/// # Example
///
/// ```
/// use volunteer_attendance::models::AttendanceTier;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let tier = AttendanceTier {
///     tier: 6,
///     required_hours: Decimal::new(8, 0),
///     expected_check_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     expected_check_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     description: "Full day".to_string(),
/// };
/// assert!(tier.is_met_by(Decimal::new(8, 0)));
/// assert!(!tier.is_met_by(Decimal::new(75, 1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTier {
    /// The tier number (1..N, unique within a table).
    pub tier: u32,
    /// Hours a volunteer must work on the day to reach this tier.
    pub required_hours: Decimal,
    /// Expected time of day for checking in.
    pub expected_check_in: NaiveTime,
    /// Expected time of day for checking out.
    pub expected_check_out: NaiveTime,
    /// Human-readable description of the tier.
    pub description: String,
}

impl AttendanceTier {
    /// Returns true if `hours` reaches this tier's required hours.
    pub fn is_met_by(&self, hours: Decimal) -> bool {
        hours >= self.required_hours
    }
}
