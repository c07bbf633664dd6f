//! Configuration loading and management for the volunteer attendance engine.
//!
//! The maximum-hours ceiling, the default tier and the tier table are
//! deploy-time constants read from YAML files once at startup.
//!
//! # Example
//!
//! ```no_run
//! use volunteer_attendance::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance").unwrap();
//! println!("Maximum hours per record: {}", config.max_hours());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendanceConfig, AttendanceSettings, ServerSettings, TiersConfig};
