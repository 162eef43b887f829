//! Monthly salary assembly.
//!
//! [`calculate_monthly_salary`] runs every step for one employee and month and
//! assembles the [`MonthlySalaryResult`]. It never fails: degenerate input
//! (no wage, malformed times, a missing holiday table) degrades to zero
//! amounts with an audit warning instead.
//!
//! ## Steps
//!
//! 1. Normalize attendance against the contract's schedule
//! 2. Aggregate daily hours into week buckets
//! 3. Resolve the hourly-equivalent wage and base pay
//! 4. Overtime, night, holiday, weekly-rest and incentive premiums
//! 5. Severance on base pay plus the premiums
//! 6. Deductions on total pay

use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::LaborRules;
use crate::models::{
    AttendanceThresholds, AuditStep, AuditTrace, AuditWarning, Deductions, Earnings, HoursSummary,
    MonthlySalaryResult, NormalizedAttendanceDetail, RawAttendanceEvent, SalaryInput, WageType,
};

use super::attendance_normalizer::normalize_attendance_events;
use super::deductions::calculate_deductions;
use super::holiday_pay::calculate_holiday_pay;
use super::incentive_pay::calculate_incentive_pay;
use super::night_pay::calculate_night_pay;
use super::overtime_pay::calculate_overtime_pay;
use super::severance_pay::calculate_severance_pay;
use super::wage_base::resolve_wage_base;
use super::weekly_aggregator::aggregate_weeks;
use super::weekly_rest_pay::calculate_weekly_rest_pay;

/// Warning code for a contract without a positive wage.
pub const WARNING_ZERO_WAGE: &str = "ZERO_WAGE";
/// Warning code for a billing month the holiday table does not cover.
pub const WARNING_HOLIDAY_TABLE_STALE: &str = "HOLIDAY_TABLE_STALE";
/// Warning code for attendance dated outside the billing month.
pub const WARNING_ATTENDANCE_OUTSIDE_MONTH: &str = "ATTENDANCE_OUTSIDE_MONTH";
/// Warning code for shifts still open at calculation time.
pub const WARNING_OPEN_SHIFT: &str = "OPEN_SHIFT";

/// Calculates one employee's salary for one billing month.
///
/// `clock` supplies the current time for shifts without a clock-out.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_monthly_salary;
/// use payroll_engine::clock::SystemClock;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{Contract, Employee, RawAttendanceEvent, SalaryInput, WageType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rules = ConfigLoader::load("config/kr").unwrap().into_rules();
/// let input = SalaryInput {
///     employee: Employee { id: "emp_001".to_string(), name: "Kim Minji".to_string(), store_id: None },
///     contract: Contract {
///         wage_type: Some(WageType::Hourly),
///         wage_amount: Some(Decimal::from(10_000)),
///         ..Contract::default()
///     },
///     attendance: vec![RawAttendanceEvent {
///         date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
///         clock_in: "09:00".to_string(),
///         clock_out: Some("18:00".to_string()),
///         incentive_hourly_rate: None,
///     }],
///     billing_month: "2025-10".parse().unwrap(),
///     thresholds: None,
/// };
///
/// let result = calculate_monthly_salary(&input, &rules, &SystemClock);
/// assert_eq!(result.earnings.base_pay, Decimal::from(90_000));
/// assert_eq!(result.net_pay, Decimal::from(90_000));
/// ```
pub fn calculate_monthly_salary(
    input: &SalaryInput,
    rules: &LaborRules,
    clock: &dyn Clock,
) -> MonthlySalaryResult {
    let start_time = Instant::now();
    let month = input.billing_month;
    let contract = input.contract.resolve();
    let thresholds = input.thresholds.unwrap_or_default();

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    if !rules.holidays().covers_year(month.year()) {
        warn!(
            employee_id = %input.employee.id,
            billing_month = %month,
            "Holiday table does not cover the billing year"
        );
        warnings.push(AuditWarning::new(
            WARNING_HOLIDAY_TABLE_STALE,
            format!(
                "No holiday table configured for {}; holiday premiums may be under-counted",
                month.year()
            ),
            "high",
        ));
    }

    if !contract.has_wage() {
        warnings.push(AuditWarning::new(
            WARNING_ZERO_WAGE,
            "Contract has no positive wage amount; salary is zero",
            "high",
        ));
        let mut result = empty_result(input, rules, contract.wage_type);
        result.audit_trace.warnings = warnings;
        result.audit_trace.duration_us = start_time.elapsed().as_micros() as u64;
        return result;
    }

    let (in_month, outside): (Vec<RawAttendanceEvent>, Vec<RawAttendanceEvent>) = input
        .attendance
        .iter()
        .cloned()
        .partition(|event| month.contains(event.date));

    if !outside.is_empty() {
        let dates: Vec<String> = outside.iter().map(|e| e.date.to_string()).collect();
        warnings.push(AuditWarning::new(
            WARNING_ATTENDANCE_OUTSIDE_MONTH,
            format!(
                "Ignored {} attendance row(s) outside {}: {}",
                outside.len(),
                month,
                dates.join(", ")
            ),
            "medium",
        ));
    }

    // Step 1: attendance
    let details = normalize_attendance_events(&in_month, &contract, &thresholds, rules, clock.now());
    steps.push(normalization_step(&details, &thresholds, 1));

    let open_shifts = details.iter().filter(|detail| detail.in_progress).count();
    if open_shifts > 0 {
        warnings.push(AuditWarning::new(
            WARNING_OPEN_SHIFT,
            format!(
                "{} shift(s) without clock-out measured up to the calculation time",
                open_shifts
            ),
            "low",
        ));
    }

    let total_work_hours: Decimal = details.iter().map(|detail| detail.work_hours).sum();

    // Step 2: weeks
    let weekly = aggregate_weeks(&details, &contract, month, rules, 2);
    steps.push(weekly.audit_step);
    let buckets = weekly.buckets;

    // Step 3: wage base
    let wage = resolve_wage_base(&contract, total_work_hours, rules, 3);
    steps.push(wage.audit_step);
    let hourly_wage = wage.hourly_wage;
    let base_pay = wage.base_pay;

    // Step 4: premiums
    let overtime = calculate_overtime_pay(&buckets, hourly_wage, &contract.allowances, rules, 4);
    let night = calculate_night_pay(&details, hourly_wage, &contract.allowances, rules, 5);
    let holiday = calculate_holiday_pay(&details, hourly_wage, &contract.allowances, rules, 6);
    let weekly_rest = calculate_weekly_rest_pay(&buckets, &contract, hourly_wage, rules, 7);
    let incentive = calculate_incentive_pay(&details, 8);

    let premiums = overtime.pay + night.pay + holiday.pay + weekly_rest.pay + incentive.pay;

    // Step 5: severance
    let severance = calculate_severance_pay(
        contract.start_date,
        month.last_day(),
        &buckets,
        base_pay + premiums,
        rules,
        9,
    );

    let total_allowances = premiums + severance.pay;
    let total_pay = base_pay + total_allowances;

    // Step 6: deductions
    let deductions = calculate_deductions(total_pay, &contract.insurance, rules, 10);
    let net_pay = total_pay - deductions.deductions.total;

    let hours = HoursSummary {
        total_work_hours,
        night_hours: night.hours,
        holiday_hours: holiday.hours,
        overtime_hours: overtime.hours,
        weekly_rest_hours: weekly_rest.hours,
        workday_count: details.len() as u32,
    };

    let earnings = Earnings {
        hourly_wage,
        base_pay,
        overtime_pay: overtime.pay,
        night_pay: night.pay,
        holiday_pay: holiday.pay,
        weekly_rest_pay: weekly_rest.pay,
        incentive_pay: incentive.pay,
        severance_pay: severance.pay,
        total_allowances,
    };

    steps.extend([
        overtime.audit_step,
        night.audit_step,
        holiday.audit_step,
        weekly_rest.audit_step,
        incentive.audit_step,
        severance.audit_step,
        deductions.audit_step,
    ]);

    let duration_us = start_time.elapsed().as_micros() as u64;

    debug!(
        employee_id = %input.employee.id,
        billing_month = %month,
        total_pay = %total_pay,
        net_pay = %net_pay,
        duration_us,
        "Salary calculated"
    );

    MonthlySalaryResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        rules_version: rules.metadata().version.clone(),
        employee_id: input.employee.id.clone(),
        employee_name: input.employee.name.clone(),
        store_id: input.employee.store_id.clone(),
        billing_month: month,
        wage_type: contract.wage_type,
        hours,
        earnings,
        deductions: deductions.deductions,
        total_pay,
        net_pay,
        weekly_buckets: buckets,
        details,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    }
}

/// Calculates many salaries in parallel.
///
/// Each calculation is independent; results are returned in input order.
pub fn calculate_batch(
    inputs: &[SalaryInput],
    rules: &LaborRules,
    clock: &dyn Clock,
) -> Vec<MonthlySalaryResult> {
    inputs
        .par_iter()
        .map(|input| calculate_monthly_salary(input, rules, clock))
        .collect()
}

fn normalization_step(
    details: &[NormalizedAttendanceDetail],
    thresholds: &AttendanceThresholds,
    step_number: u32,
) -> AuditStep {
    let adjusted: Vec<serde_json::Value> = details
        .iter()
        .filter(|detail| {
            detail.adjusted_clock_in != detail.clock_in
                || detail.clock_out.as_deref() != Some(detail.adjusted_clock_out.as_str())
        })
        .map(|detail| {
            serde_json::json!({
                "date": detail.date.to_string(),
                "clock_in": detail.clock_in,
                "clock_out": detail.clock_out,
                "adjusted_clock_in": detail.adjusted_clock_in,
                "adjusted_clock_out": detail.adjusted_clock_out
            })
        })
        .collect();

    AuditStep {
        step_number,
        rule_id: "attendance_normalization".to_string(),
        rule_name: "Attendance Threshold Adjustment".to_string(),
        legal_ref: "Workplace attendance policy".to_string(),
        input: serde_json::json!({
            "events": details.len(),
            "thresholds": thresholds
        }),
        output: serde_json::json!({
            "adjusted": adjusted,
            "total_work_hours": details
                .iter()
                .map(|detail| detail.work_hours)
                .sum::<Decimal>()
                .normalize()
                .to_string()
        }),
        reasoning: format!(
            "Normalized {} attendance row(s); {} adjusted to the schedule",
            details.len(),
            adjusted.len()
        ),
    }
}

fn empty_result(
    input: &SalaryInput,
    rules: &LaborRules,
    wage_type: WageType,
) -> MonthlySalaryResult {
    MonthlySalaryResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        rules_version: rules.metadata().version.clone(),
        employee_id: input.employee.id.clone(),
        employee_name: input.employee.name.clone(),
        store_id: input.employee.store_id.clone(),
        billing_month: input.billing_month,
        wage_type,
        hours: HoursSummary::default(),
        earnings: Earnings::default(),
        deductions: Deductions::default(),
        total_pay: Decimal::ZERO,
        net_pay: Decimal::ZERO,
        weekly_buckets: Vec::new(),
        details: Vec::new(),
        audit_trace: AuditTrace::default(),
    }
}
