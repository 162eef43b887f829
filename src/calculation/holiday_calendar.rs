//! Statutory holiday lookup.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::config::HolidayYear;

/// An immutable, year-scoped set of statutory holidays.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::HolidayCalendar;
/// use payroll_engine::config::{HolidayEntry, HolidayYear};
/// use chrono::NaiveDate;
///
/// let hangul_day = NaiveDate::from_ymd_opt(2025, 10, 9).unwrap();
/// let calendar = HolidayCalendar::from_years(vec![HolidayYear {
///     year: 2025,
///     holidays: vec![HolidayEntry { date: hangul_day, name: "Hangul Day".to_string() }],
/// }]);
///
/// assert!(calendar.is_holiday(hangul_day));
/// assert_eq!(calendar.holiday_name(hangul_day), Some("Hangul Day"));
/// assert!(!calendar.covers_year(2026));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    holidays: BTreeMap<NaiveDate, String>,
    years: BTreeSet<i32>,
}

impl HolidayCalendar {
    /// Builds the calendar from yearly holiday files.
    ///
    /// Dates listed under the wrong year are still honoured; the year only
    /// records which years the table claims to cover.
    pub fn from_years(years: Vec<HolidayYear>) -> Self {
        let mut calendar = Self::default();
        for year in years {
            calendar.years.insert(year.year);
            for holiday in year.holidays {
                calendar.holidays.insert(holiday.date, holiday.name);
            }
        }
        calendar
    }

    /// Returns true if `date` is a statutory holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// The holiday's name, if `date` is a holiday.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    /// Returns true if a holiday table for `year` is configured.
    ///
    /// A missing year means holiday premiums for that year cannot be trusted.
    pub fn covers_year(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    /// Holidays between `start` and `end` inclusive, in date order.
    pub fn holidays_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.holidays
            .range(start..=end.max(start))
            .map(|(date, name)| (*date, name.as_str()))
    }
}
