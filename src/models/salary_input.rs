//! The inputs of one salary calculation.

use serde::{Deserialize, Serialize};

use super::{AttendanceThresholds, BillingMonth, Contract, Employee, RawAttendanceEvent};

/// Everything needed to calculate one employee's salary for one month.
///
/// Thresholds are resolved by the caller; `None` applies the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// The employee.
    pub employee: Employee,
    /// The wage contract in force for the month.
    pub contract: Contract,
    /// Raw attendance rows, in any order.
    #[serde(default)]
    pub attendance: Vec<RawAttendanceEvent>,
    /// The month being paid.
    pub billing_month: BillingMonth,
    /// The location's threshold policy.
    #[serde(default)]
    pub thresholds: Option<AttendanceThresholds>,
}
