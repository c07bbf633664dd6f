//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the attendance
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::{DEFAULT_MAX_HOURS, DEFAULT_TIER, TierTable, compute_hours};
use crate::error::{EngineError, EngineResult};
use crate::models::AttendanceTier;

use super::types::{AttendanceConfig, AttendanceSettings, ServerSettings, TiersConfig};

/// Loads and provides access to the attendance configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// validates the tier table once, so every later lookup is infallible.
///
/// # Directory Structure
///
/// ```text
/// config/attendance/
/// ├── settings.yaml   # max_hours, default_tier, server
/// └── tiers.yaml      # tier definitions
/// ```
///
/// # Example
///
/// ```no_run
/// use volunteer_attendance::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/attendance")?;
/// let tier = loader.resolve_tier(99);
/// println!("Tier {}: {}", tier.tier, tier.description);
/// # Ok::<(), volunteer_attendance::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AttendanceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML (`ConfigParseError`)
    /// - The tier table or maximum hours violate an invariant (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<AttendanceSettings>(&path.join("settings.yaml"))?;
        let tiers_config = Self::load_yaml::<TiersConfig>(&path.join("tiers.yaml"))?;

        if settings.max_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: format!("max_hours must be positive, got {}", settings.max_hours),
            });
        }

        let tiers = TierTable::new(tiers_config.tiers, settings.default_tier)?;

        info!(
            path = %path.display(),
            tiers = tiers.len(),
            default_tier = settings.default_tier,
            max_hours = %settings.max_hours.normalize(),
            "Loaded attendance configuration"
        );

        Ok(Self {
            config: AttendanceConfig::new(settings, tiers),
        })
    }

    /// Builds the reference configuration without touching disk: the
    /// built-in tier table, [`DEFAULT_MAX_HOURS`] and default server settings.
    pub fn reference() -> Self {
        let settings = AttendanceSettings {
            max_hours: DEFAULT_MAX_HOURS,
            default_tier: DEFAULT_TIER,
            server: ServerSettings::default(),
        };

        Self {
            config: AttendanceConfig::new(settings, TierTable::reference()),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AttendanceConfig {
        &self.config
    }

    /// Returns the tier table.
    pub fn tier_table(&self) -> &TierTable {
        self.config.tiers()
    }

    /// Returns the ceiling on hours per record.
    pub fn max_hours(&self) -> Decimal {
        self.config.max_hours()
    }

    /// Returns the HTTP server settings.
    pub fn server(&self) -> &ServerSettings {
        &self.config.settings().server
    }

    /// Resolves a tier number, falling back to the configured default tier.
    pub fn resolve_tier(&self, tier: i64) -> &AttendanceTier {
        self.config.tiers().resolve(tier)
    }

    /// Computes clamped hours using the configured maximum.
    pub fn compute_hours(
        &self,
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
    ) -> EngineResult<Decimal> {
        compute_hours(check_in, check_out, self.max_hours())
    }
}
