//! Severance accrual.
//!
//! Accrued as `round((base + allowances) × tenure_days ÷ 365 × 30)` once the
//! worker has at least a year of tenure and averages at least 15 hours a
//! week. Tenure is measured from the contract start to the last day of the
//! billing month.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::LaborRules;
use crate::models::{AuditStep, WeeklyBucket};

use super::premium::PremiumResult;
use super::rounding::round_won;

/// Average of the weekly bucket hours, or zero with no buckets.
pub fn average_weekly_hours(buckets: &[WeeklyBucket]) -> Decimal {
    if buckets.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = buckets.iter().map(|bucket| bucket.hours).sum();
    total / Decimal::from(buckets.len())
}

/// Days from `start_date` to `as_of`, never negative.
pub fn tenure_days(start_date: NaiveDate, as_of: NaiveDate) -> i64 {
    (as_of - start_date).num_days().max(0)
}

/// Calculates the severance accrual.
///
/// `pay_so_far` is base pay plus every other allowance already computed.
/// The `hours` of the result carries the average weekly hours.
pub fn calculate_severance_pay(
    start_date: Option<NaiveDate>,
    as_of: NaiveDate,
    buckets: &[WeeklyBucket],
    pay_so_far: Decimal,
    rules: &LaborRules,
    step_number: u32,
) -> PremiumResult {
    let rule = &rules.standards().severance;
    let average_hours = average_weekly_hours(buckets);
    let tenure = start_date.map(|start| tenure_days(start, as_of));

    let (pay, reasoning) = match tenure {
        None => (Decimal::ZERO, "No contract start date".to_string()),
        Some(days) if days < rule.min_tenure_days => (
            Decimal::ZERO,
            format!(
                "Tenure of {} days is below the {}-day minimum",
                days, rule.min_tenure_days
            ),
        ),
        Some(_) if average_hours < rule.min_average_weekly_hours => (
            Decimal::ZERO,
            format!(
                "Average weekly hours {} below the {}-hour minimum",
                average_hours.round_dp(2).normalize(),
                rule.min_average_weekly_hours.normalize()
            ),
        ),
        Some(_) if rule.days_per_year <= Decimal::ZERO => (
            Decimal::ZERO,
            "Severance days per year not configured".to_string(),
        ),
        Some(days) => {
            let pay = round_won(
                pay_so_far * Decimal::from(days) / rule.days_per_year * rule.days_of_pay,
            );
            (
                pay,
                format!(
                    "{} × {} days ÷ {} × {} = {}",
                    pay_so_far,
                    days,
                    rule.days_per_year.normalize(),
                    rule.days_of_pay.normalize(),
                    pay
                ),
            )
        }
    };

    PremiumResult {
        hours: average_hours,
        pay,
        audit_step: AuditStep {
            step_number,
            rule_id: "severance_pay".to_string(),
            rule_name: "Severance Accrual".to_string(),
            legal_ref: "Employee Retirement Benefit Security Act Art. 8".to_string(),
            input: serde_json::json!({
                "start_date": start_date.map(|d| d.to_string()),
                "as_of": as_of.to_string(),
                "pay_so_far": pay_so_far.to_string(),
                "min_tenure_days": rule.min_tenure_days,
                "min_average_weekly_hours": rule.min_average_weekly_hours.normalize().to_string()
            }),
            output: serde_json::json!({
                "tenure_days": tenure,
                "average_weekly_hours": average_hours.round_dp(2).normalize().to_string(),
                "severance_pay": pay.to_string()
            }),
            reasoning,
        },
    }
}
