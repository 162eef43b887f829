//! Monthly schedule generation.
//!
//! Expands a contract's weekly schedule into concrete shifts for one billing
//! month, using the same day walk as the weekly absence scan so both agree on
//! which days are scheduled.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BillingMonth, ResolvedContract};

use super::holiday_calendar::HolidayCalendar;
use super::time_interval::work_hours;

/// One scheduled shift on a concrete date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedShift {
    /// The shift's date.
    pub date: NaiveDate,
    /// The shift's weekday.
    pub weekday: Weekday,
    /// Scheduled start, `HH:MM`.
    pub start_time: String,
    /// Scheduled end, `HH:MM`.
    pub end_time: String,
    /// Scheduled hours, wrapping past midnight when the end is earlier.
    pub scheduled_hours: Decimal,
    /// Whether the date is a statutory holiday.
    pub is_holiday: bool,
    /// The holiday's name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
}

/// Generates one planned shift per scheduled day of `month`.
///
/// Holidays are flagged rather than skipped; whether a store closes on a
/// holiday is the caller's decision.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{generate_schedule, HolidayCalendar};
/// use payroll_engine::models::{BillingMonth, Contract, ScheduleEntry};
/// use chrono::Weekday;
///
/// let contract = Contract {
///     schedule: vec![ScheduleEntry {
///         weekday: Weekday::Mon,
///         start_time: "09:00".to_string(),
///         end_time: "18:00".to_string(),
///     }],
///     ..Contract::default()
/// }
/// .resolve();
///
/// let month: BillingMonth = "2025-10".parse().unwrap();
/// let shifts = generate_schedule(&contract, month, &HolidayCalendar::default());
/// assert_eq!(shifts.len(), 4);
/// ```
pub fn generate_schedule(
    contract: &ResolvedContract,
    month: BillingMonth,
    holidays: &HolidayCalendar,
) -> Vec<PlannedShift> {
    month
        .days()
        .filter_map(|date| {
            let entry = contract
                .schedule
                .iter()
                .find(|entry| entry.weekday == date.weekday())?;
            let holiday_name = holidays.holiday_name(date).map(str::to_string);
            Some(PlannedShift {
                date,
                weekday: date.weekday(),
                start_time: entry.start_time.clone(),
                end_time: entry.end_time.clone(),
                scheduled_hours: work_hours(&entry.start_time, &entry.end_time),
                is_holiday: holiday_name.is_some(),
                holiday_name,
            })
        })
        .collect()
}
