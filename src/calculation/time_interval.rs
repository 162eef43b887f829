//! Clock-time arithmetic for attendance records.
//!
//! Attendance rows carry wall-clock strings (`"09:00"`) without dates, so every
//! duration here is computed on a 24-hour dial: an end time at or before the
//! start time belongs to the next day. Unparseable input never panics; it is
//! read as midnight. Callers that need to tell a bad clock string apart from
//! a real midnight use [`parse_clock`].

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::NightWindow;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Start of the statutory night window (22:00) in minutes after midnight.
pub const NIGHT_WINDOW_START_MINUTES: i64 = 22 * 60;

/// End of the statutory night window (06:00 the following day) in minutes after midnight.
pub const NIGHT_WINDOW_END_MINUTES: i64 = 6 * 60;

/// Parses a 24-hour clock string into minutes after midnight.
///
/// Accepts `HH:MM` and `HH:MM:SS`; anything else is `None`.
pub fn parse_clock(time: &str) -> Option<i64> {
    let trimmed = time.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map(|t| i64::from(t.hour() * 60 + t.minute()))
        .ok()
}

/// Parses a 24-hour clock string into minutes after midnight.
///
/// Accepts `HH:MM` and `HH:MM:SS`. Anything else yields `0`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::to_minutes;
///
/// assert_eq!(to_minutes("09:30"), 570);
/// assert_eq!(to_minutes("23:59:59"), 1439);
/// assert_eq!(to_minutes("not a time"), 0);
/// ```
pub fn to_minutes(time: &str) -> i64 {
    parse_clock(time).unwrap_or(0)
}

/// Renders minutes after midnight as an `HH:MM` clock string.
///
/// Values outside one day wrap around the dial.
pub fn minutes_to_clock(minutes: i64) -> String {
    let minutes = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Converts a minute count to fractional hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

/// Signed distance from `reference` to `actual` on the 24-hour dial.
///
/// The result lies in `(-720, 720]`, so 23:55 is five minutes before 00:00
/// rather than almost a full day after it.
pub fn clock_offset(actual: i64, reference: i64) -> i64 {
    let forward = (actual - reference).rem_euclid(MINUTES_PER_DAY);
    if forward > MINUTES_PER_DAY / 2 {
        forward - MINUTES_PER_DAY
    } else {
        forward
    }
}

/// Worked minutes between two clock positions.
///
/// An end at or before the start is read as the next day, so equal
/// boundaries are a full day.
pub fn work_minutes(start: i64, end: i64) -> i64 {
    if end <= start {
        end + MINUTES_PER_DAY - start
    } else {
        end - start
    }
}

/// Worked hours between two clock strings, wrapping past midnight.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::work_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(work_hours("09:00", "18:00"), Decimal::from(9));
/// assert_eq!(work_hours("22:00", "02:00"), Decimal::from(4));
/// assert_eq!(work_hours("09:00", "09:30"), Decimal::new(5, 1));
/// assert_eq!(work_hours("09:00", "09:00"), Decimal::from(24));
/// ```
pub fn work_hours(start: &str, end: &str) -> Decimal {
    minutes_to_hours(work_minutes(to_minutes(start), to_minutes(end)))
}

/// Minutes of `[start, end)` that fall inside the night window.
///
/// The window opens at `window_start` on the shift's start day and closes at
/// `window_end`, on the following day when it wraps. A shift starting at
/// 02:00 therefore earns no night minutes before 22:00.
pub fn night_minutes(start: i64, end: i64, window_start: i64, window_end: i64) -> i64 {
    let shift_end = start + work_minutes(start, end);
    let window_end = window_start + work_minutes(window_start, window_end);

    (shift_end.min(window_end) - start.max(window_start)).max(0)
}

/// Night hours between two clock strings using the statutory 22:00–06:00 window.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::night_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(night_hours("21:00", "06:00"), Decimal::from(8));
/// assert_eq!(night_hours("09:00", "18:00"), Decimal::ZERO);
/// ```
pub fn night_hours(start: &str, end: &str) -> Decimal {
    minutes_to_hours(night_minutes(
        to_minutes(start),
        to_minutes(end),
        NIGHT_WINDOW_START_MINUTES,
        NIGHT_WINDOW_END_MINUTES,
    ))
}

/// Night hours for minute positions using a configured window.
pub fn night_hours_within(start: i64, end: i64, window: &NightWindow) -> Decimal {
    minutes_to_hours(night_minutes(
        start,
        end,
        window.start_minutes(),
        window.end_minutes(),
    ))
}

/// Formats fractional hours for display, e.g. `"7h 30m"`.
///
/// Only used for presentation; arithmetic always works on the decimal value.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::format_duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_duration(Decimal::from(9)), "9h");
/// assert_eq!(format_duration(Decimal::new(75, 1)), "7h 30m");
/// assert_eq!(format_duration(Decimal::new(75, 2)), "45m");
/// ```
pub fn format_duration(hours: Decimal) -> String {
    let total_minutes = (hours * Decimal::from(60))
        .round()
        .to_i64()
        .unwrap_or(0)
        .max(0);
    let (h, m) = (total_minutes / 60, total_minutes % 60);

    match (h, m) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
