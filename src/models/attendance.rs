//! Attendance models: raw clock events, threshold policy and normalized days.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A location's tolerance policy for clock-in/clock-out deviations, in minutes.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceThresholds;
///
/// let defaults = AttendanceThresholds::default();
/// assert_eq!(defaults.early_clock_in_minutes, 15);
/// assert_eq!(defaults.early_clock_out_tolerance_minutes, 5);
/// assert_eq!(defaults.late_clock_out_minutes, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceThresholds {
    /// How early a clock-in must be before the extra time counts.
    pub early_clock_in_minutes: i64,
    /// How early a clock-out may be without reducing pay.
    pub early_clock_out_tolerance_minutes: i64,
    /// How late a clock-out must be before the extra time counts.
    pub late_clock_out_minutes: i64,
}

impl Default for AttendanceThresholds {
    fn default() -> Self {
        Self {
            early_clock_in_minutes: 15,
            early_clock_out_tolerance_minutes: 5,
            late_clock_out_minutes: 5,
        }
    }
}

/// One day's clock-in/clock-out record as captured at the terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAttendanceEvent {
    /// The calendar date the shift started on.
    pub date: NaiveDate,
    /// Clock-in time, `HH:MM`.
    pub clock_in: String,
    /// Clock-out time, `HH:MM`. Missing while the shift is still open.
    #[serde(default)]
    pub clock_out: Option<String>,
    /// Incentive per hour for this shift, overriding the contract's rate.
    #[serde(default)]
    pub incentive_hourly_rate: Option<Decimal>,
}

/// A day of attendance after threshold adjustment.
///
/// `night_hours <= work_hours` and `work_hours >= 0` always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAttendanceDetail {
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// Clock-in as recorded.
    pub clock_in: String,
    /// Clock-out as recorded, or `None` for an open shift.
    pub clock_out: Option<String>,
    /// Clock-in after threshold adjustment, `HH:MM`.
    pub adjusted_clock_in: String,
    /// Clock-out after threshold adjustment, `HH:MM`.
    pub adjusted_clock_out: String,
    /// Paid hours for the day.
    pub work_hours: Decimal,
    /// Hours inside the night window. Zero unless the night allowance applies.
    pub night_hours: Decimal,
    /// Whether the date is a statutory holiday.
    pub is_holiday: bool,
    /// Incentive earned for the day.
    pub incentive_pay: Decimal,
    /// Whether the shift is still open and was measured up to "now".
    pub in_progress: bool,
    /// Work duration for display, e.g. `"8h 30m"`.
    pub work_duration: String,
}
