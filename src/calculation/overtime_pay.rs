//! Weekly overtime premium.
//!
//! Hours beyond the weekly threshold (40 hours under LSA Art. 50) in any week
//! bucket earn the overtime multiplier on the hourly wage. Excess is summed
//! across all weeks of the month before pricing.

use rust_decimal::Decimal;

use crate::config::LaborRules;
use crate::models::{AllowanceFlags, AuditStep, WeeklyBucket};

use super::premium::PremiumResult;
use super::rounding::round_won;

/// Sums the excess over the weekly threshold across all buckets.
pub fn weekly_excess_hours(buckets: &[WeeklyBucket], threshold: Decimal) -> Decimal {
    buckets
        .iter()
        .map(|bucket| (bucket.hours - threshold).max(Decimal::ZERO))
        .sum()
}

/// Calculates the weekly overtime premium.
///
/// Excess hours are always reported; pay is zero unless the contract grants
/// the overtime allowance.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_overtime_pay;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{AllowanceFlags, WeekKey, WeeklyBucket};
/// use rust_decimal::Decimal;
///
/// let rules = ConfigLoader::load("config/kr").unwrap().into_rules();
/// let buckets = vec![WeeklyBucket {
///     key: WeekKey { year: 2025, month: 10, week: 2 },
///     hours: Decimal::from(44),
///     has_absence: false,
/// }];
/// let flags = AllowanceFlags { overtime: true, ..AllowanceFlags::default() };
///
/// let result = calculate_overtime_pay(&buckets, Decimal::from(10_000), &flags, &rules, 1);
/// assert_eq!(result.hours, Decimal::from(4));
/// assert_eq!(result.pay, Decimal::from(60_000));
/// ```
pub fn calculate_overtime_pay(
    buckets: &[WeeklyBucket],
    hourly_wage: Decimal,
    allowances: &AllowanceFlags,
    rules: &LaborRules,
    step_number: u32,
) -> PremiumResult {
    let rule = &rules.standards().overtime;
    let hours = weekly_excess_hours(buckets, rule.weekly_threshold_hours);

    let (pay, reasoning) = if allowances.overtime {
        let pay = round_won(hours * hourly_wage * rule.multiplier);
        (
            pay,
            format!(
                "{} hours over the {}-hour weekly threshold × {} × {} = {}",
                hours.normalize(),
                rule.weekly_threshold_hours.normalize(),
                hourly_wage.round_dp(2).normalize(),
                rule.multiplier.normalize(),
                pay
            ),
        )
    } else {
        (
            Decimal::ZERO,
            format!(
                "Overtime allowance not granted; {} excess hours unpaid",
                hours.normalize()
            ),
        )
    };

    PremiumResult {
        hours,
        pay,
        audit_step: AuditStep {
            step_number,
            rule_id: "overtime_pay".to_string(),
            rule_name: "Weekly Overtime Premium".to_string(),
            legal_ref: "LSA Art. 56(1)".to_string(),
            input: serde_json::json!({
                "granted": allowances.overtime,
                "weeks": buckets.len(),
                "weekly_threshold_hours": rule.weekly_threshold_hours.normalize().to_string(),
                "multiplier": rule.multiplier.normalize().to_string()
            }),
            output: serde_json::json!({
                "overtime_hours": hours.normalize().to_string(),
                "overtime_pay": pay.to_string()
            }),
            reasoning,
        },
    }
}
