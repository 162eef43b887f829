//! Salary result models.
//!
//! This module contains [`MonthlySalaryResult`] and the structures it is built
//! from: hour figures, earnings, deductions, week buckets and the audit trace
//! that records how each figure was reached.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BillingMonth, NormalizedAttendanceDetail, WageType};

/// Identifies a week within a billing month.
///
/// Week 1 is the calendar week containing the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekKey {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    /// Week of month, starting at 1.
    pub week: u32,
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-W{}", self.year, self.month, self.week)
    }
}

/// Hours accumulated in one week of the billing month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// The week this bucket covers.
    pub key: WeekKey,
    /// Sum of daily work hours, each day capped at the daily limit.
    pub hours: Decimal,
    /// Whether a scheduled working day in this week has no attendance.
    pub has_absence: bool,
}

/// Hour figures behind the pay components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSummary {
    /// Total adjusted work hours across all days.
    pub total_work_hours: Decimal,
    /// Hours inside the night window (night allowance only).
    pub night_hours: Decimal,
    /// Hours worked on statutory holidays.
    pub holiday_hours: Decimal,
    /// Weekly hours beyond the overtime threshold.
    pub overtime_hours: Decimal,
    /// Paid weekly-rest hours earned.
    pub weekly_rest_hours: Decimal,
    /// Number of attendance days.
    pub workday_count: u32,
}

/// Base pay and every premium, each rounded to whole won.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    /// Hourly-equivalent wage used for every premium.
    pub hourly_wage: Decimal,
    /// Base pay before premiums.
    pub base_pay: Decimal,
    /// Weekly overtime premium.
    pub overtime_pay: Decimal,
    /// Night work premium.
    pub night_pay: Decimal,
    /// Holiday work premium.
    pub holiday_pay: Decimal,
    /// Weekly-rest-day pay.
    pub weekly_rest_pay: Decimal,
    /// Incentive pay.
    pub incentive_pay: Decimal,
    /// Severance accrual.
    pub severance_pay: Decimal,
    /// Sum of every premium and severance.
    pub total_allowances: Decimal,
}

/// Statutory deductions, each rounded to whole won.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// National pension contribution.
    pub national_pension: Decimal,
    /// Health insurance contribution.
    pub health_insurance: Decimal,
    /// Long-term care insurance contribution.
    pub long_term_care: Decimal,
    /// Employment insurance contribution.
    pub employment_insurance: Decimal,
    /// Withholding income tax.
    pub income_tax: Decimal,
    /// Sum of all deductions.
    pub total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The statutory provision behind the rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings never stop a calculation; they flag figures that deserve review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The salary of one employee for one billing month.
///
/// `total_pay == earnings.base_pay + earnings.total_allowances` and
/// `net_pay == total_pay - deductions.total` always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySalaryResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The version of the labor rules applied.
    pub rules_version: String,
    /// The employee the salary is for.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The employee's store, if known.
    pub store_id: Option<String>,
    /// The billing month.
    pub billing_month: BillingMonth,
    /// The contract's wage type.
    pub wage_type: WageType,
    /// Hour figures.
    pub hours: HoursSummary,
    /// Base pay and premiums.
    pub earnings: Earnings,
    /// Statutory deductions.
    pub deductions: Deductions,
    /// Base pay plus all allowances.
    pub total_pay: Decimal,
    /// Total pay minus deductions.
    pub net_pay: Decimal,
    /// Week buckets in week order.
    pub weekly_buckets: Vec<WeeklyBucket>,
    /// Per-day attendance detail in date order.
    pub details: Vec<NormalizedAttendanceDetail>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_key_display() {
        let key = WeekKey {
            year: 2025,
            month: 3,
            week: 2,
        };
        assert_eq!(key.to_string(), "2025-03-W2");
    }

    #[test]
    fn test_week_keys_order_chronologically() {
        let earlier = WeekKey {
            year: 2025,
            month: 9,
            week: 5,
        };
        let later = WeekKey {
            year: 2025,
            month: 10,
            week: 1,
        };
        assert!(earlier < later);
    }

    #[test]
    fn test_default_figures_are_zero() {
        assert_eq!(Earnings::default().total_allowances, Decimal::ZERO);
        assert_eq!(Deductions::default().total, Decimal::ZERO);
        assert_eq!(HoursSummary::default().workday_count, 0);
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning::new("ZERO_WAGE", "no wage", "high");
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["code"], "ZERO_WAGE");
        assert_eq!(json["severity"], "high");
    }

    #[test]
    fn test_deductions_serialize_amounts_as_strings() {
        let deductions = Deductions {
            national_pension: Decimal::from(135000),
            ..Deductions::default()
        };
        let json = serde_json::to_value(&deductions).unwrap();
        assert_eq!(json["national_pension"], "135000");
    }
}
