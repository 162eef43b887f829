//! Monthly salary engine for Korean labor law
//!
//! This crate computes a worker's monthly pay from raw attendance and a wage
//! contract: threshold-adjusted work hours, weekly aggregation with absence
//! detection, night/holiday/overtime/weekly-rest premiums, severance accrual
//! and statutory deductions, each step recorded in an audit trace.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod thresholds;
