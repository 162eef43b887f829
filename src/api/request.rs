//! Request types for the payroll engine API.
//!
//! Contracts are accepted in two shapes: the current one with a per-weekday
//! `schedule`, and the legacy one with a `work_days` list and a single
//! `start_time`/`end_time`. Both are normalized into a [`Contract`] here,
//! before the engine sees them.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceFlags, AttendanceThresholds, BillingMonth, Contract, Employee, InsuranceFlags,
    RawAttendanceEvent, SalaryInput, ScheduleEntry, WageType,
};

/// A contract in either the current or the legacy shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractRequest {
    /// How the wage is expressed.
    #[serde(default)]
    pub wage_type: Option<WageType>,
    /// The wage amount.
    #[serde(default)]
    pub wage_amount: Option<Decimal>,
    /// Per-weekday schedule.
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
    /// Legacy: scheduled weekdays sharing one start and end time.
    #[serde(default)]
    pub work_days: Option<Vec<Weekday>>,
    /// Legacy: scheduled start, `HH:MM`.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Legacy: scheduled end, `HH:MM`.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Contractual weekly hours.
    #[serde(default)]
    pub weekly_hours: Option<Decimal>,
    /// The first day of the contract.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Granted premiums.
    #[serde(default)]
    pub allowances: Option<AllowanceFlags>,
    /// Insurance enrolment.
    #[serde(default)]
    pub insurance: Option<InsuranceFlags>,
    /// Incentive per hour worked.
    #[serde(default)]
    pub incentive_hourly_rate: Option<Decimal>,
}

impl TryFrom<ContractRequest> for Contract {
    type Error = EngineError;

    fn try_from(req: ContractRequest) -> EngineResult<Self> {
        let schedule = match (req.work_days, req.schedule.is_empty()) {
            (None, _) => req.schedule,
            (Some(_), false) => {
                return Err(EngineError::InvalidSchedule {
                    message: "use either schedule or work_days, not both".to_string(),
                });
            }
            (Some(days), true) => {
                let (Some(start_time), Some(end_time)) = (req.start_time, req.end_time) else {
                    return Err(EngineError::InvalidSchedule {
                        message: "work_days requires start_time and end_time".to_string(),
                    });
                };
                legacy_schedule(&days, &start_time, &end_time)
            }
        };

        Ok(Contract {
            wage_type: req.wage_type,
            wage_amount: req.wage_amount,
            schedule,
            weekly_hours: req.weekly_hours,
            start_date: req.start_date,
            allowances: req.allowances,
            insurance: req.insurance,
            incentive_hourly_rate: req.incentive_hourly_rate,
        })
    }
}

/// Expands a legacy weekday list into schedule entries, dropping duplicates.
fn legacy_schedule(days: &[Weekday], start_time: &str, end_time: &str) -> Vec<ScheduleEntry> {
    let mut schedule: Vec<ScheduleEntry> = Vec::with_capacity(days.len());
    for weekday in days {
        if schedule.iter().all(|entry| entry.weekday != *weekday) {
            schedule.push(ScheduleEntry {
                weekday: *weekday,
                start_time: start_time.to_string(),
                end_time: end_time.to_string(),
            });
        }
    }
    schedule
}

/// Request body for `POST /salary/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// The employee.
    pub employee: Employee,
    /// The contract in force for the month.
    pub contract: ContractRequest,
    /// Raw attendance rows.
    #[serde(default)]
    pub attendance: Vec<RawAttendanceEvent>,
    /// The month being paid.
    pub billing_month: BillingMonth,
    /// Explicit thresholds, overriding the store's policy.
    #[serde(default)]
    pub thresholds: Option<AttendanceThresholds>,
}

impl TryFrom<SalaryRequest> for SalaryInput {
    type Error = EngineError;

    fn try_from(req: SalaryRequest) -> EngineResult<Self> {
        Ok(SalaryInput {
            employee: req.employee,
            contract: req.contract.try_into()?,
            attendance: req.attendance,
            billing_month: req.billing_month,
            thresholds: req.thresholds,
        })
    }
}

/// Request body for `POST /salary/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Independent salary requests.
    pub requests: Vec<SalaryRequest>,
}

/// Request body for `POST /schedule/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// The contract whose schedule to expand.
    pub contract: ContractRequest,
    /// The month to expand it over.
    pub billing_month: BillingMonth,
}
