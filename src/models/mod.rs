//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod billing_month;
mod contract;
mod employee;
mod salary_input;
mod salary_result;

pub use attendance::{AttendanceThresholds, NormalizedAttendanceDetail, RawAttendanceEvent};
pub use billing_month::{BillingMonth, DayRange};
pub use contract::{
    AllowanceFlags, Contract, InsuranceFlags, ResolvedContract, ScheduleEntry, WageType,
};
pub use employee::Employee;
pub use salary_input::SalaryInput;
pub use salary_result::{
    AuditStep, AuditTrace, AuditWarning, Deductions, Earnings, HoursSummary, MonthlySalaryResult,
    WeekKey, WeeklyBucket,
};
