//! Error types for the volunteer attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can surface to its callers.

use chrono::NaiveDateTime;
use thiserror::Error;

/// The main error type for the volunteer attendance engine.
///
/// Unknown tier numbers are deliberately absent: tier lookups fall back to
/// the configured default tier and never fail.
///
/// # Example
///
/// ```
/// use volunteer_attendance::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tiers.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tiers.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates an invariant (duplicate tiers,
    /// missing default tier, negative ceiling and so on).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the violated invariant.
        message: String,
    },

    /// A check-out timestamp precedes its check-in timestamp.
    #[error("Invalid time range: check-out {check_out} precedes check-in {check_in}")]
    InvalidTimeRange {
        /// The recorded check-in.
        check_in: NaiveDateTime,
        /// The recorded check-out.
        check_out: NaiveDateTime,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
