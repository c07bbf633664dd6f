//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::TierTable;
use crate::models::AttendanceTier;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// The address to bind.
    pub address: IpAddr,
    /// The port to bind.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5730,
        }
    }
}

impl ServerSettings {
    /// Returns the socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// Settings file structure (`settings.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttendanceSettings {
    /// Ceiling on the hours credited for a single record.
    pub max_hours: Decimal,
    /// Tier number returned when a lookup misses.
    pub default_tier: u32,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
}

/// Tiers file structure (`tiers.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    /// The tier definitions.
    pub tiers: Vec<AttendanceTier>,
}

/// The complete attendance configuration.
///
/// Built once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct AttendanceConfig {
    settings: AttendanceSettings,
    tiers: TierTable,
}

impl AttendanceConfig {
    /// Creates a new AttendanceConfig from its component parts.
    pub fn new(settings: AttendanceSettings, tiers: TierTable) -> Self {
        Self { settings, tiers }
    }

    /// Returns the settings.
    pub fn settings(&self) -> &AttendanceSettings {
        &self.settings
    }

    /// Returns the tier table.
    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Returns the ceiling on hours per record.
    pub fn max_hours(&self) -> Decimal {
        self.settings.max_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_deserialize_with_default_server() {
        let yaml = "max_hours: 8\ndefault_tier: 6\n";
        let settings: AttendanceSettings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.max_hours, Decimal::new(8, 0));
        assert_eq!(settings.default_tier, 6);
        assert_eq!(settings.server, ServerSettings::default());
        assert_eq!(settings.server.socket_addr().to_string(), "127.0.0.1:5730");
    }

    #[test]
    fn test_settings_deserialize_partial_server() {
        let yaml = "max_hours: 7.5\ndefault_tier: 2\nserver:\n  port: 8080\n";
        let settings: AttendanceSettings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.max_hours, Decimal::new(75, 1));
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_settings_missing_max_hours_is_rejected() {
        let result: Result<AttendanceSettings, _> = serde_yaml::from_str("default_tier: 6\n");
        assert!(result.is_err());
    }
}
