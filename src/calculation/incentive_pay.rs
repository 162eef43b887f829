//! Incentive pay totals.

use rust_decimal::Decimal;

use crate::models::{AuditStep, NormalizedAttendanceDetail};

use super::premium::PremiumResult;
use super::rounding::round_won;

/// Sums the per-day incentive amounts.
///
/// Each day's incentive was priced and rounded during normalization; this
/// step only totals them. `hours` is the work time of days that carried an
/// incentive.
pub fn calculate_incentive_pay(
    details: &[NormalizedAttendanceDetail],
    step_number: u32,
) -> PremiumResult {
    let paid_days: Vec<&NormalizedAttendanceDetail> = details
        .iter()
        .filter(|detail| detail.incentive_pay > Decimal::ZERO)
        .collect();

    let hours: Decimal = paid_days.iter().map(|detail| detail.work_hours).sum();
    let pay = round_won(paid_days.iter().map(|detail| detail.incentive_pay).sum());

    PremiumResult {
        hours,
        pay,
        audit_step: AuditStep {
            step_number,
            rule_id: "incentive_pay".to_string(),
            rule_name: "Hourly Incentive".to_string(),
            legal_ref: "Employment contract".to_string(),
            input: serde_json::json!({
                "days_with_incentive": paid_days.len(),
                "incentive_hours": hours.normalize().to_string()
            }),
            output: serde_json::json!({
                "incentive_pay": pay.to_string()
            }),
            reasoning: format!(
                "Incentive earned on {} day(s) totalling {}",
                paid_days.len(),
                pay
            ),
        },
    }
}
