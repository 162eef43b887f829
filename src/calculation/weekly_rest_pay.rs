//! Weekly-rest-day pay.
//!
//! An hourly worker who completes a qualifying week earns one paid rest day,
//! prorated as a fifth of the week's hours. Salaried contracts already
//! include it in the 209-hour conversion.
//!
//! ## Eligibility
//!
//! - The contract is hourly, and
//! - its contractual weekly hours meet the minimum (15) or the weekly-rest
//!   allowance is explicitly granted.
//!
//! Each eligible week must then have no absence and at least the minimum
//! weekly hours on its own.

use rust_decimal::Decimal;

use crate::config::LaborRules;
use crate::models::{AuditStep, ResolvedContract, WageType, WeeklyBucket};

use super::premium::PremiumResult;
use super::rounding::round_won;

/// Returns true if the contract earns weekly-rest pay at all.
pub fn weekly_rest_eligible(contract: &ResolvedContract, rules: &LaborRules) -> bool {
    contract.wage_type == WageType::Hourly
        && (contract.weekly_hours >= rules.standards().weekly_rest.min_weekly_hours
            || contract.allowances.weekly_rest)
}

/// Calculates weekly-rest-day pay.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_weekly_rest_pay;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{Contract, WageType, WeekKey, WeeklyBucket};
/// use rust_decimal::Decimal;
///
/// let rules = ConfigLoader::load("config/kr").unwrap().into_rules();
/// let contract = Contract {
///     wage_type: Some(WageType::Hourly),
///     wage_amount: Some(Decimal::from(10_000)),
///     weekly_hours: Some(Decimal::from(40)),
///     ..Contract::default()
/// }
/// .resolve();
/// let buckets = vec![WeeklyBucket {
///     key: WeekKey { year: 2025, month: 10, week: 2 },
///     hours: Decimal::from(40),
///     has_absence: false,
/// }];
///
/// let result = calculate_weekly_rest_pay(&buckets, &contract, Decimal::from(10_000), &rules, 1);
/// assert_eq!(result.hours, Decimal::from(8));
/// assert_eq!(result.pay, Decimal::from(80_000));
/// ```
pub fn calculate_weekly_rest_pay(
    buckets: &[WeeklyBucket],
    contract: &ResolvedContract,
    hourly_wage: Decimal,
    rules: &LaborRules,
    step_number: u32,
) -> PremiumResult {
    let rule = &rules.standards().weekly_rest;
    let eligible = weekly_rest_eligible(contract, rules);

    let qualifying: Vec<&WeeklyBucket> = if eligible && rule.hours_divisor > Decimal::ZERO {
        buckets
            .iter()
            .filter(|bucket| !bucket.has_absence && bucket.hours >= rule.min_weekly_hours)
            .collect()
    } else {
        Vec::new()
    };

    let hours: Decimal = qualifying
        .iter()
        .map(|bucket| bucket.hours / rule.hours_divisor)
        .sum();
    let pay = round_won(hourly_wage * hours);

    let reasoning = if !eligible {
        format!(
            "Not eligible: {} contract with {} contractual weekly hours and weekly-rest allowance {}",
            wage_type_label(contract.wage_type),
            contract.weekly_hours.normalize(),
            if contract.allowances.weekly_rest {
                "granted"
            } else {
                "not granted"
            }
        )
    } else {
        format!(
            "{} of {} week(s) qualify (no absence, at least {} hours); rest hours {} × {} = {}",
            qualifying.len(),
            buckets.len(),
            rule.min_weekly_hours.normalize(),
            hours.normalize(),
            hourly_wage.round_dp(2).normalize(),
            pay
        )
    };

    PremiumResult {
        hours,
        pay,
        audit_step: AuditStep {
            step_number,
            rule_id: "weekly_rest_pay".to_string(),
            rule_name: "Weekly Rest Day Pay".to_string(),
            legal_ref: "LSA Art. 55, 18(3)".to_string(),
            input: serde_json::json!({
                "eligible": eligible,
                "contract_weekly_hours": contract.weekly_hours.normalize().to_string(),
                "min_weekly_hours": rule.min_weekly_hours.normalize().to_string(),
                "hours_divisor": rule.hours_divisor.normalize().to_string()
            }),
            output: serde_json::json!({
                "qualifying_weeks": qualifying.iter().map(|b| b.key.to_string()).collect::<Vec<_>>(),
                "weekly_rest_hours": hours.normalize().to_string(),
                "weekly_rest_pay": pay.to_string()
            }),
            reasoning,
        },
    }
}

fn wage_type_label(wage_type: WageType) -> &'static str {
    match wage_type {
        WageType::Hourly => "hourly",
        WageType::Monthly => "monthly",
        WageType::Annual => "annual",
    }
}
