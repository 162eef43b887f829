//! Wage base resolution.
//!
//! Every premium is priced off a single hourly-equivalent wage. Hourly
//! contracts use the amount directly; monthly and annual salaries are
//! converted with the configured standard monthly hours (209 in Korea,
//! 40 hours plus 8 paid rest hours a week, averaged over a month).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LaborRules;
use crate::models::{AuditStep, ResolvedContract, WageType};

use super::rounding::round_won;

/// The hourly-equivalent wage and the base pay for the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageBaseResult {
    /// Hourly-equivalent wage, unrounded.
    pub hourly_wage: Decimal,
    /// Base pay, rounded to whole won.
    pub base_pay: Decimal,
    /// The audit step recording the conversion.
    pub audit_step: AuditStep,
}

/// Resolves the hourly-equivalent wage and base pay.
///
/// - Hourly: hourly = amount, base = amount × total work hours
/// - Monthly: hourly = amount ÷ standard monthly hours, base = amount
/// - Annual: monthly = amount ÷ months per year, hourly = monthly ÷ standard
///   monthly hours, base = monthly
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_wage_base;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{Contract, WageType};
/// use rust_decimal::Decimal;
///
/// let rules = ConfigLoader::load("config/kr").unwrap().into_rules();
/// let contract = Contract {
///     wage_type: Some(WageType::Hourly),
///     wage_amount: Some(Decimal::from(10_000)),
///     ..Contract::default()
/// }
/// .resolve();
///
/// let result = resolve_wage_base(&contract, Decimal::from(9), &rules, 1);
/// assert_eq!(result.hourly_wage, Decimal::from(10_000));
/// assert_eq!(result.base_pay, Decimal::from(90_000));
/// ```
pub fn resolve_wage_base(
    contract: &ResolvedContract,
    total_work_hours: Decimal,
    rules: &LaborRules,
    step_number: u32,
) -> WageBaseResult {
    let standards = rules.standards();
    let monthly_hours = standards.standard_monthly_hours;
    let amount = contract.wage_amount;

    let (hourly_wage, base_pay, reasoning) = match contract.wage_type {
        WageType::Hourly => {
            let base = round_won(amount * total_work_hours);
            (
                amount,
                base,
                format!(
                    "Hourly wage {} × {} hours worked = {}",
                    amount.normalize(),
                    total_work_hours.normalize(),
                    base
                ),
            )
        }
        WageType::Monthly => {
            let hourly = hourly_from_monthly(amount, monthly_hours);
            (
                hourly,
                round_won(amount),
                format!(
                    "Monthly salary {} paid in full; hourly equivalent {} ÷ {} hours",
                    amount.normalize(),
                    amount.normalize(),
                    monthly_hours.normalize()
                ),
            )
        }
        WageType::Annual => {
            let monthly = if standards.months_per_year > Decimal::ZERO {
                amount / standards.months_per_year
            } else {
                Decimal::ZERO
            };
            let hourly = hourly_from_monthly(monthly, monthly_hours);
            (
                hourly,
                round_won(monthly),
                format!(
                    "Annual salary {} ÷ {} months = {} monthly; hourly equivalent ÷ {} hours",
                    amount.normalize(),
                    standards.months_per_year.normalize(),
                    round_won(monthly),
                    monthly_hours.normalize()
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "wage_base".to_string(),
        rule_name: "Hourly Wage and Base Pay".to_string(),
        legal_ref: "Minimum Wage Act Enforcement Decree Art. 5".to_string(),
        input: serde_json::json!({
            "wage_type": contract.wage_type,
            "wage_amount": amount.normalize().to_string(),
            "total_work_hours": total_work_hours.normalize().to_string(),
            "standard_monthly_hours": monthly_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "hourly_wage": hourly_wage.round_dp(4).normalize().to_string(),
            "base_pay": base_pay.to_string()
        }),
        reasoning,
    };

    WageBaseResult {
        hourly_wage,
        base_pay,
        audit_step,
    }
}

fn hourly_from_monthly(monthly: Decimal, monthly_hours: Decimal) -> Decimal {
    if monthly_hours > Decimal::ZERO {
        monthly / monthly_hours
    } else {
        Decimal::ZERO
    }
}
