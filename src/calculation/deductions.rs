//! Statutory deductions.
//!
//! Each contribution is computed on total pay and rounded on its own before
//! summing. Long-term care is levied on the rounded health contribution, so
//! it follows the health flag. Work-injury insurance is employer-paid and has
//! no employee deduction, but enrolment in it still triggers withholding tax.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LaborRules;
use crate::models::{AuditStep, Deductions, InsuranceFlags};

use super::rounding::round_won;

/// The deductions for a month and the audit step that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    /// Each deduction and their total.
    pub deductions: Deductions,
    /// The audit step recording the calculation.
    pub audit_step: AuditStep,
}

/// Calculates statutory deductions on `total_pay`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::InsuranceFlags;
/// use rust_decimal::Decimal;
///
/// let rules = ConfigLoader::load("config/kr").unwrap().into_rules();
/// let flags = InsuranceFlags { pension: true, ..InsuranceFlags::default() };
///
/// let result = calculate_deductions(Decimal::from(3_000_000), &flags, &rules, 1);
/// assert_eq!(result.deductions.national_pension, Decimal::from(135_000));
/// assert_eq!(result.deductions.income_tax, Decimal::from(99_000));
/// assert_eq!(result.deductions.total, Decimal::from(234_000));
/// ```
pub fn calculate_deductions(
    total_pay: Decimal,
    insurance: &InsuranceFlags,
    rules: &LaborRules,
    step_number: u32,
) -> DeductionResult {
    let rates = rules.insurance();

    let national_pension = charge(insurance.pension, total_pay, rates.national_pension);
    let health_insurance = charge(insurance.health, total_pay, rates.health_insurance);
    let long_term_care = if insurance.health {
        round_won(health_insurance * rates.long_term_care * rates.long_term_care_employee_share)
    } else {
        Decimal::ZERO
    };
    let employment_insurance = charge(insurance.employment, total_pay, rates.employment_insurance);
    let income_tax = charge(insurance.any(), total_pay, rates.income_tax);

    let total =
        national_pension + health_insurance + long_term_care + employment_insurance + income_tax;

    let deductions = Deductions {
        national_pension,
        health_insurance,
        long_term_care,
        employment_insurance,
        income_tax,
        total,
    };

    let reasoning = if insurance.any() {
        format!("Deductions on total pay {} = {}", total_pay, total)
    } else {
        "No insurance enrolment; nothing withheld".to_string()
    };

    DeductionResult {
        audit_step: AuditStep {
            step_number,
            rule_id: "deductions".to_string(),
            rule_name: "Social Insurance and Withholding Tax".to_string(),
            legal_ref: "National Pension Act Art. 88; National Health Insurance Act Art. 69; Employment Insurance Act Art. 13; Income Tax Act Art. 129".to_string(),
            input: serde_json::json!({
                "total_pay": total_pay.to_string(),
                "insurance": insurance
            }),
            output: serde_json::json!({
                "national_pension": national_pension.to_string(),
                "health_insurance": health_insurance.to_string(),
                "long_term_care": long_term_care.to_string(),
                "employment_insurance": employment_insurance.to_string(),
                "income_tax": income_tax.to_string(),
                "total": total.to_string()
            }),
            reasoning,
        },
        deductions,
    }
}

fn charge(enrolled: bool, base: Decimal, rate: Decimal) -> Decimal {
    if enrolled {
        round_won(base * rate)
    } else {
        Decimal::ZERO
    }
}
