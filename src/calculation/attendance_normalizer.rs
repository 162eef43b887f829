//! Attendance normalization.
//!
//! Turns raw clock-in/clock-out rows into paid work hours by applying the
//! location's threshold policy against the contract's scheduled window:
//! trivial deviations snap to the schedule, meaningful ones are kept.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_decimal::Decimal;

use crate::config::LaborRules;
use crate::models::{
    AttendanceThresholds, NormalizedAttendanceDetail, RawAttendanceEvent, ResolvedContract,
};

use super::rounding::round_won;
use super::time_interval::{
    clock_offset, format_duration, minutes_to_clock, minutes_to_hours, night_hours_within,
    parse_clock, to_minutes, work_minutes,
};

/// Adjusts an actual clock-in against the scheduled start.
///
/// An arrival earlier than the schedule by less than the early clock-in
/// threshold snaps to the scheduled start. Earlier arrivals, late arrivals and
/// on-time arrivals keep the actual time.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::adjust_clock_in;
/// use payroll_engine::models::AttendanceThresholds;
///
/// let thresholds = AttendanceThresholds::default(); // 15 minutes
/// assert_eq!(adjust_clock_in(530, 540, &thresholds), 540); // 08:50 -> 09:00
/// assert_eq!(adjust_clock_in(510, 540, &thresholds), 510); // 08:30 kept
/// assert_eq!(adjust_clock_in(550, 540, &thresholds), 550); // late kept
/// ```
pub fn adjust_clock_in(actual: i64, scheduled: i64, thresholds: &AttendanceThresholds) -> i64 {
    let early_by = -clock_offset(actual, scheduled);

    if early_by > 0 && early_by < thresholds.early_clock_in_minutes {
        scheduled
    } else {
        actual
    }
}

/// Adjusts an actual clock-out against the scheduled end.
///
/// - early by at most the tolerance: snaps to the scheduled end
/// - early by more than the tolerance: actual end kept (pay reduced)
/// - late by less than the overtime threshold: snaps to the scheduled end
/// - late by at least the threshold: actual end kept
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::adjust_clock_out;
/// use payroll_engine::models::AttendanceThresholds;
///
/// let thresholds = AttendanceThresholds::default(); // 5 / 5 minutes
/// assert_eq!(adjust_clock_out(1075, 1080, &thresholds), 1080); // 17:55 -> 18:00
/// assert_eq!(adjust_clock_out(1070, 1080, &thresholds), 1070); // 17:50 kept
/// assert_eq!(adjust_clock_out(1084, 1080, &thresholds), 1080); // 18:04 -> 18:00
/// assert_eq!(adjust_clock_out(1085, 1080, &thresholds), 1085); // 18:05 kept
/// ```
pub fn adjust_clock_out(actual: i64, scheduled: i64, thresholds: &AttendanceThresholds) -> i64 {
    let offset = clock_offset(actual, scheduled);

    if offset < 0 {
        if -offset <= thresholds.early_clock_out_tolerance_minutes {
            scheduled
        } else {
            actual
        }
    } else if offset < thresholds.late_clock_out_minutes {
        scheduled
    } else {
        actual
    }
}

/// Normalizes a single attendance event.
///
/// An event without a clock-out is measured up to `now` and marked in
/// progress. Night hours are only recorded when the contract grants the night
/// allowance. Incentive pay uses the event's own rate when present, otherwise
/// the contract's. An unparseable clock-in or clock-out yields zero hours.
pub fn normalize_attendance(
    event: &RawAttendanceEvent,
    contract: &ResolvedContract,
    thresholds: &AttendanceThresholds,
    rules: &LaborRules,
    now: NaiveDateTime,
) -> NormalizedAttendanceDetail {
    let parsed_in = parse_clock(&event.clock_in);
    let (parsed_out, in_progress) = match &event.clock_out {
        Some(clock_out) => (parse_clock(clock_out), false),
        None => (Some(i64::from(now.hour() * 60 + now.minute())), true),
    };
    let actual_in = parsed_in.unwrap_or(0);
    let actual_out = parsed_out.unwrap_or(0);

    // A bad clock string, or a shift opened this very minute, has no duration
    let measurable = parsed_in.is_some()
        && parsed_out.is_some()
        && !(in_progress && actual_in == actual_out);

    let (adjusted_in, adjusted_out) = match contract.window_for(event.date.weekday()) {
        Some(window) => (
            adjust_clock_in(actual_in, to_minutes(&window.start_time), thresholds),
            adjust_clock_out(actual_out, to_minutes(&window.end_time), thresholds),
        ),
        None => (actual_in, actual_out),
    };

    let work_hours = if measurable {
        minutes_to_hours(work_minutes(adjusted_in, adjusted_out))
    } else {
        Decimal::ZERO
    };

    let night_hours = if measurable && contract.allowances.night {
        night_hours_within(adjusted_in, adjusted_out, &rules.standards().night_window)
    } else {
        Decimal::ZERO
    };

    let incentive_pay = event
        .incentive_hourly_rate
        .filter(|rate| *rate > Decimal::ZERO)
        .or(contract.incentive_hourly_rate)
        .map(|rate| round_won(rate * work_hours))
        .unwrap_or(Decimal::ZERO);

    NormalizedAttendanceDetail {
        date: event.date,
        clock_in: event.clock_in.clone(),
        clock_out: event.clock_out.clone(),
        adjusted_clock_in: minutes_to_clock(adjusted_in),
        adjusted_clock_out: minutes_to_clock(adjusted_out),
        work_hours,
        night_hours,
        is_holiday: rules.holidays().is_holiday(event.date),
        incentive_pay,
        in_progress,
        work_duration: format_duration(work_hours),
    }
}

/// Normalizes every event, returning details ordered by date and clock-in.
pub fn normalize_attendance_events(
    events: &[RawAttendanceEvent],
    contract: &ResolvedContract,
    thresholds: &AttendanceThresholds,
    rules: &LaborRules,
    now: NaiveDateTime,
) -> Vec<NormalizedAttendanceDetail> {
    let mut ordered: Vec<&RawAttendanceEvent> = events.iter().collect();
    ordered.sort_by_key(|event| (event.date, to_minutes(&event.clock_in)));

    ordered
        .into_iter()
        .map(|event| normalize_attendance(event, contract, thresholds, rules, now))
        .collect()
}
