//! Labor rule configuration for the payroll engine.
//!
//! Every jurisdiction-specific constant (holiday table, standard monthly
//! hours, premium multipliers, insurance rates) is loaded from a versioned
//! directory of YAML files, so a new year or a rate change is a data change.
//!
//! # Example
//!
//! ```
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("config/kr").unwrap();
//! println!("Loaded rules: {} {}", config.metadata().name, config.metadata().version);
//! ```

mod loader;
mod server;
mod types;

pub use loader::ConfigLoader;
pub use server::{BIND_ADDR_VAR, CONFIG_DIR_VAR, ServerSettings, THRESHOLD_TIMEOUT_VAR};
pub use types::{
    HolidayEntry, HolidayYear, InsuranceRates, JurisdictionMetadata, LaborRules, LaborStandards,
    NightWindow, OvertimeRule, PremiumRule, SeveranceRule, ThresholdPolicies, WeekStart,
    WeeklyRestRule,
};
