//! Statutory holiday work premium.

use rust_decimal::Decimal;

use crate::config::LaborRules;
use crate::models::{AllowanceFlags, AuditStep, NormalizedAttendanceDetail};

use super::premium::PremiumResult;
use super::rounding::round_won;

/// Calculates the holiday work premium.
///
/// Sums work hours on days flagged as statutory holidays. The hours are
/// reported regardless of the allowance; pay requires it.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_holiday_pay;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::AllowanceFlags;
/// use rust_decimal::Decimal;
///
/// let rules = ConfigLoader::load("config/kr").unwrap().into_rules();
/// let flags = AllowanceFlags { holiday: true, ..AllowanceFlags::default() };
///
/// let result = calculate_holiday_pay(&[], Decimal::from(10_000), &flags, &rules, 1);
/// assert_eq!(result.hours, Decimal::ZERO);
/// assert_eq!(result.pay, Decimal::ZERO);
/// ```
pub fn calculate_holiday_pay(
    details: &[NormalizedAttendanceDetail],
    hourly_wage: Decimal,
    allowances: &AllowanceFlags,
    rules: &LaborRules,
    step_number: u32,
) -> PremiumResult {
    let multiplier = rules.standards().holiday.multiplier;

    let holiday_days: Vec<&NormalizedAttendanceDetail> =
        details.iter().filter(|detail| detail.is_holiday).collect();
    let hours: Decimal = holiday_days.iter().map(|detail| detail.work_hours).sum();

    let pay = if allowances.holiday {
        round_won(hours * hourly_wage * multiplier)
    } else {
        Decimal::ZERO
    };

    let dates: Vec<String> = holiday_days
        .iter()
        .map(|detail| {
            let name = rules.holidays().holiday_name(detail.date).unwrap_or("holiday");
            format!("{} ({})", detail.date, name)
        })
        .collect();

    let reasoning = match (allowances.holiday, holiday_days.is_empty()) {
        (_, true) => "No work on statutory holidays".to_string(),
        (false, false) => format!(
            "Holiday allowance not granted; {} holiday hours unpaid",
            hours.normalize()
        ),
        (true, false) => format!(
            "{} hours on {} × {} × {} = {}",
            hours.normalize(),
            dates.join(", "),
            hourly_wage.round_dp(2).normalize(),
            multiplier.normalize(),
            pay
        ),
    };

    PremiumResult {
        hours,
        pay,
        audit_step: AuditStep {
            step_number,
            rule_id: "holiday_pay".to_string(),
            rule_name: "Holiday Work Premium".to_string(),
            legal_ref: "LSA Art. 56(2)".to_string(),
            input: serde_json::json!({
                "granted": allowances.holiday,
                "holiday_dates": dates,
                "multiplier": multiplier.normalize().to_string()
            }),
            output: serde_json::json!({
                "holiday_hours": hours.normalize().to_string(),
                "holiday_pay": pay.to_string()
            }),
            reasoning,
        },
    }
}
