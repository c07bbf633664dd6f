//! Volunteer Attendance Engine
//!
//! This crate computes the hours volunteers worked from their check-in and
//! check-out records, resolves attendance tiers with a default fallback, and
//! assembles ordered export reports for the spreadsheet writer.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
