//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading labor rules
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::AttendanceThresholds;

use super::types::{
    HolidayYear, InsuranceRates, JurisdictionMetadata, LaborRules, LaborStandards,
    ThresholdPolicies,
};

/// Loads and provides access to a jurisdiction's labor rules.
///
/// # Directory Structure
///
/// ```text
/// config/kr/
/// ├── jurisdiction.yaml   # Rule set metadata and version
/// ├── labor.yaml          # Standard hours, premiums, weekly rest, severance
/// ├── insurance.yaml      # Employee contribution and withholding rates
/// ├── thresholds.yaml     # Per-store attendance policies (optional)
/// └── holidays/
///     └── 2025.yaml       # Statutory holidays of one year
/// ```
///
/// # Example
///
/// ```
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("config/kr").unwrap();
/// assert_eq!(loader.metadata().code, "KR");
/// assert!(loader.rules().holidays().is_holiday(NaiveDate::from_ymd_opt(2025, 10, 9).unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: LaborRules,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if a required file or the holiday directory is missing
    /// - `ConfigParseError` if any file contains invalid YAML or misses a field
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;
        let standards = Self::load_yaml::<LaborStandards>(&path.join("labor.yaml"))?;
        let insurance = Self::load_yaml::<InsuranceRates>(&path.join("insurance.yaml"))?;

        let thresholds_path = path.join("thresholds.yaml");
        let thresholds = if thresholds_path.exists() {
            Self::load_yaml::<ThresholdPolicies>(&thresholds_path)?
        } else {
            debug!(path = %thresholds_path.display(), "No store threshold policies configured");
            ThresholdPolicies::default()
        };

        let holiday_years = Self::load_holidays(&path.join("holidays"))?;

        info!(
            jurisdiction = %metadata.code,
            version = %metadata.version,
            holiday_years = holiday_years.len(),
            stores = thresholds.stores.len(),
            "Loaded labor rules"
        );

        Ok(Self {
            rules: LaborRules::new(metadata, standards, insurance, holiday_years, thresholds),
        })
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

    /// Loads every yearly holiday file from the holidays directory.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<Vec<HolidayYear>> {
        let holidays_dir_str = holidays_dir.display().to_string();

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: holidays_dir_str.clone(),
        })?;

        let mut years = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: holidays_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                years.push(Self::load_yaml::<HolidayYear>(&path)?);
            }
        }

        if years.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no holiday files found)", holidays_dir_str),
            });
        }

        years.sort_by_key(|year| year.year);
        Ok(years)
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &LaborRules {
        &self.rules
    }

    /// Consumes the loader, returning the rules.
    pub fn into_rules(self) -> LaborRules {
        self.rules
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        self.rules.metadata()
    }

    /// Returns the configured threshold policy for a store, if any.
    pub fn store_thresholds(&self, store_id: &str) -> Option<AttendanceThresholds> {
        self.rules.store_thresholds(store_id)
    }
}
