//! Configuration types for labor rules.
//!
//! These are the strongly-typed structures deserialized from the YAML files
//! of a jurisdiction directory. Every rate, multiplier and threshold the
//! engine applies lives here rather than in code.

use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{HolidayCalendar, to_minutes};
use crate::models::AttendanceThresholds;

/// Metadata about the rule set.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Jurisdiction code (e.g., "KR").
    pub code: String,
    /// Human-readable name of the governing law.
    pub name: String,
    /// Version of this rule set.
    pub version: String,
    /// Currency all amounts are expressed in.
    pub currency: String,
    /// URL to the statute.
    pub source_url: String,
}

/// First day of the week used for week-of-month numbering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    /// Weeks run Sunday to Saturday.
    #[default]
    Sunday,
    /// Weeks run Monday to Sunday.
    Monday,
}

impl WeekStart {
    /// The chrono weekday weeks start on.
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

/// The daily interval that earns the night premium.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NightWindow {
    /// Window start, `HH:MM`.
    pub start: String,
    /// Window end on the following day, `HH:MM`.
    pub end: String,
}

impl NightWindow {
    /// Window start in minutes after midnight.
    pub fn start_minutes(&self) -> i64 {
        to_minutes(&self.start)
    }

    /// Window end in minutes after midnight.
    pub fn end_minutes(&self) -> i64 {
        to_minutes(&self.end)
    }
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            start: "22:00".to_string(),
            end: "06:00".to_string(),
        }
    }
}

/// Weekly overtime rule.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeRule {
    /// Weekly hours beyond which overtime is paid.
    pub weekly_threshold_hours: Decimal,
    /// Premium multiplier on the hourly wage.
    pub multiplier: Decimal,
}

/// A premium expressed only as a multiplier on the hourly wage.
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumRule {
    /// Premium multiplier on the hourly wage.
    pub multiplier: Decimal,
}

/// Weekly-rest-day pay rule.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyRestRule {
    /// Minimum weekly hours for a week to qualify.
    pub min_weekly_hours: Decimal,
    /// A qualifying week earns `hours / hours_divisor` paid rest hours.
    pub hours_divisor: Decimal,
}

/// Severance accrual rule.
#[derive(Debug, Clone, Deserialize)]
pub struct SeveranceRule {
    /// Minimum tenure in days.
    pub min_tenure_days: i64,
    /// Minimum average weekly hours.
    pub min_average_weekly_hours: Decimal,
    /// Days per year used to scale tenure.
    pub days_per_year: Decimal,
    /// Days of pay accrued per year of tenure.
    pub days_of_pay: Decimal,
}

/// Working-time standards from labor.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct LaborStandards {
    /// Monthly standard hours used to derive an hourly wage from a salary.
    pub standard_monthly_hours: Decimal,
    /// Months per year used to derive a monthly wage from an annual salary.
    pub months_per_year: Decimal,
    /// First day of the week for week-of-month numbering.
    #[serde(default)]
    pub week_starts_on: WeekStart,
    /// Daily hours counted towards a week bucket.
    pub daily_cap_hours: Decimal,
    /// The night premium window.
    #[serde(default)]
    pub night_window: NightWindow,
    /// Weekly overtime.
    pub overtime: OvertimeRule,
    /// Night work premium.
    pub night: PremiumRule,
    /// Holiday work premium.
    pub holiday: PremiumRule,
    /// Weekly-rest-day pay.
    pub weekly_rest: WeeklyRestRule,
    /// Severance accrual.
    pub severance: SeveranceRule,
}

/// Employee contribution rates from insurance.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct InsuranceRates {
    /// National pension rate on total pay.
    pub national_pension: Decimal,
    /// Health insurance rate on total pay.
    pub health_insurance: Decimal,
    /// Long-term care rate on the health insurance contribution.
    pub long_term_care: Decimal,
    /// Employee share of the long-term care contribution.
    pub long_term_care_employee_share: Decimal,
    /// Employment insurance rate on total pay.
    pub employment_insurance: Decimal,
    /// Withholding income tax rate on total pay.
    pub income_tax: Decimal,
}

/// A statutory holiday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HolidayEntry {
    /// The holiday's date.
    pub date: NaiveDate,
    /// The holiday's name.
    pub name: String,
}

/// One year's holiday file from `holidays/<year>.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayYear {
    /// The year the file covers.
    pub year: i32,
    /// The holidays of that year.
    pub holidays: Vec<HolidayEntry>,
}

/// Per-store threshold policies from thresholds.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThresholdPolicies {
    /// Map of store id to its threshold policy.
    #[serde(default)]
    pub stores: HashMap<String, AttendanceThresholds>,
}

/// The complete rule set loaded from a jurisdiction directory.
#[derive(Debug, Clone)]
pub struct LaborRules {
    metadata: JurisdictionMetadata,
    standards: LaborStandards,
    insurance: InsuranceRates,
    holidays: HolidayCalendar,
    thresholds: ThresholdPolicies,
}

impl LaborRules {
    /// Creates a rule set from its component parts.
    pub fn new(
        metadata: JurisdictionMetadata,
        standards: LaborStandards,
        insurance: InsuranceRates,
        holiday_years: Vec<HolidayYear>,
        thresholds: ThresholdPolicies,
    ) -> Self {
        Self {
            metadata,
            standards,
            insurance,
            holidays: HolidayCalendar::from_years(holiday_years),
            thresholds,
        }
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the working-time standards.
    pub fn standards(&self) -> &LaborStandards {
        &self.standards
    }

    /// Returns the insurance contribution rates.
    pub fn insurance(&self) -> &InsuranceRates {
        &self.insurance
    }

    /// Returns the holiday table.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    /// Returns the configured threshold policy for a store, if any.
    pub fn store_thresholds(&self, store_id: &str) -> Option<AttendanceThresholds> {
        self.thresholds.stores.get(store_id).copied()
    }
}
