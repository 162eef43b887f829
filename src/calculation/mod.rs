//! Calculation logic for the payroll engine.
//!
//! This module contains every step of the monthly salary calculation:
//! time interval arithmetic, holiday lookup, attendance normalization,
//! weekly aggregation, wage base resolution, the premium calculations
//! (overtime, night, holiday, weekly rest, incentive, severance),
//! statutory deductions and the orchestrating engine. Schedule generation
//! shares the same day walk as the weekly absence scan.

mod attendance_normalizer;
mod deductions;
mod engine;
mod holiday_calendar;
mod holiday_pay;
mod incentive_pay;
mod night_pay;
mod overtime_pay;
mod premium;
mod rounding;
mod schedule;
mod severance_pay;
mod time_interval;
mod wage_base;
mod weekly_aggregator;
mod weekly_rest_pay;

pub use attendance_normalizer::{
    adjust_clock_in, adjust_clock_out, normalize_attendance, normalize_attendance_events,
};
pub use deductions::{DeductionResult, calculate_deductions};
pub use engine::{
    WARNING_ATTENDANCE_OUTSIDE_MONTH, WARNING_HOLIDAY_TABLE_STALE, WARNING_OPEN_SHIFT,
    WARNING_ZERO_WAGE, calculate_batch, calculate_monthly_salary,
};
pub use holiday_calendar::HolidayCalendar;
pub use holiday_pay::calculate_holiday_pay;
pub use incentive_pay::calculate_incentive_pay;
pub use night_pay::calculate_night_pay;
pub use overtime_pay::{calculate_overtime_pay, weekly_excess_hours};
pub use premium::PremiumResult;
pub use rounding::round_won;
pub use schedule::{PlannedShift, generate_schedule};
pub use severance_pay::{average_weekly_hours, calculate_severance_pay, tenure_days};
pub use time_interval::{
    MINUTES_PER_DAY, NIGHT_WINDOW_END_MINUTES, NIGHT_WINDOW_START_MINUTES, clock_offset,
    format_duration, minutes_to_clock, minutes_to_hours, night_hours, night_hours_within,
    night_minutes, parse_clock, to_minutes, work_hours, work_minutes,
};
pub use wage_base::{WageBaseResult, resolve_wage_base};
pub use weekly_aggregator::{WeeklyAggregation, aggregate_weeks, week_key};
pub use weekly_rest_pay::{calculate_weekly_rest_pay, weekly_rest_eligible};
