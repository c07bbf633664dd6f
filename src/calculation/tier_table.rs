//! Attendance tier table and resolver.
//!
//! This module provides the [`TierTable`], an immutable, ordered set of
//! attendance tiers with a guaranteed-present default tier, and the built-in
//! reference table shared process-wide through [`reference_table`].

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::AttendanceTier;

/// The default tier of the reference table.
pub const DEFAULT_TIER: u32 = 6;

/// (tier, required hours, check-in hour, check-out hour, description)
const REFERENCE_TIERS: [(u32, i64, u32, u32, &str); 6] = [
    (1, 1, 9, 10, "Drop-in: one hour of service"),
    (2, 2, 9, 11, "Short shift"),
    (3, 3, 9, 12, "Morning shift"),
    (4, 4, 9, 13, "Half day"),
    (5, 6, 9, 15, "Extended day"),
    (6, 8, 9, 17, "Full day"),
];

static REFERENCE: LazyLock<TierTable> = LazyLock::new(TierTable::reference);

/// Returns the built-in reference tier table (tiers 1 to 6, default tier 6).
///
/// The table is built once on first use and shared for the life of the process.
pub fn reference_table() -> &'static TierTable {
    &REFERENCE
}

fn time_of_day(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
}

/// An immutable, ordered table of attendance tiers.
///
/// Construction validates the table once; lookups afterwards never fail.
///
/// # Example
///
/// ```
/// use volunteer_attendance::calculation::reference_table;
///
/// let table = reference_table();
/// assert_eq!(table.resolve(2).tier, 2);
/// // Unknown tiers fall back to the default tier.
/// assert_eq!(table.resolve(99).tier, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    /// Tiers sorted by tier number.
    tiers: Vec<AttendanceTier>,
    /// Position of the default tier in `tiers`.
    default_index: usize,
}

impl TierTable {
    /// Creates a tier table, validating its invariants.
    ///
    /// # Arguments
    ///
    /// * `tiers` - The tier definitions, in any order
    /// * `default_tier` - The tier number returned for unknown lookups
    ///
    /// # Returns
    ///
    /// Returns the table sorted by tier number, or `InvalidConfig` if:
    /// - The table is empty
    /// - A tier number is zero or appears twice
    /// - A tier requires zero or negative hours
    /// - The default tier is not in the table
    pub fn new(mut tiers: Vec<AttendanceTier>, default_tier: u32) -> EngineResult<Self> {
        if tiers.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "tier table is empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for tier in &tiers {
            if tier.tier == 0 {
                return Err(EngineError::InvalidConfig {
                    message: "tier numbers start at 1".to_string(),
                });
            }
            if !seen.insert(tier.tier) {
                return Err(EngineError::InvalidConfig {
                    message: format!("tier {} is defined more than once", tier.tier),
                });
            }
            if tier.required_hours <= Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "tier {} requires {} hours; required hours must be positive",
                        tier.tier, tier.required_hours
                    ),
                });
            }
        }

        tiers.sort_by_key(|t| t.tier);

        let default_index = tiers
            .iter()
            .position(|t| t.tier == default_tier)
            .ok_or_else(|| EngineError::InvalidConfig {
                message: format!("default tier {} is not in the tier table", default_tier),
            })?;

        if tiers
            .windows(2)
            .any(|pair| pair[1].required_hours <= pair[0].required_hours)
        {
            warn!("required hours do not strictly increase with tier number");
        }

        Ok(Self {
            tiers,
            default_index,
        })
    }

    /// Builds the reference table from the built-in tier data.
    pub fn reference() -> Self {
        let tiers: Vec<AttendanceTier> = REFERENCE_TIERS
            .iter()
            .map(|&(tier, hours, check_in, check_out, description)| AttendanceTier {
                tier,
                required_hours: Decimal::from(hours),
                expected_check_in: time_of_day(check_in),
                expected_check_out: time_of_day(check_out),
                description: description.to_string(),
            })
            .collect();

        // Reference data is sorted and contains DEFAULT_TIER at the last slot.
        let default_index = tiers.len() - 1;
        Self {
            tiers,
            default_index,
        }
    }

    /// Looks up the tier with exactly this number.
    pub fn get(&self, tier: u32) -> Option<&AttendanceTier> {
        self.tiers
            .binary_search_by_key(&tier, |t| t.tier)
            .ok()
            .map(|index| &self.tiers[index])
    }

    /// Resolves a tier number, falling back to the default tier on a miss.
    ///
    /// Any integer is accepted; negative or out-of-range numbers resolve to
    /// the default tier.
    pub fn resolve(&self, tier: i64) -> &AttendanceTier {
        u32::try_from(tier)
            .ok()
            .and_then(|number| self.get(number))
            .unwrap_or_else(|| self.default_tier())
    }

    /// Returns true if `tier` is defined in the table.
    pub fn contains(&self, tier: i64) -> bool {
        u32::try_from(tier).is_ok_and(|number| self.get(number).is_some())
    }

    /// Returns the default tier.
    pub fn default_tier(&self) -> &AttendanceTier {
        &self.tiers[self.default_index]
    }

    /// Returns all tiers ordered by tier number.
    pub fn tiers(&self) -> &[AttendanceTier] {
        &self.tiers
    }

    /// Returns the highest tier whose required hours are met by `hours`.
    ///
    /// Returns `None` when `hours` is below every tier's requirement.
    pub fn classify(&self, hours: Decimal) -> Option<&AttendanceTier> {
        self.tiers.iter().rev().find(|t| t.is_met_by(hours))
    }

    /// Returns the number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always false: a constructed table holds at least its default tier.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
