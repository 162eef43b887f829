//! Weekly aggregation of normalized attendance.
//!
//! Daily hours are bucketed by week of month for the weekly overtime and
//! weekly-rest checks. A single long day is capped so it cannot inflate a
//! week on its own, and any scheduled working day without attendance marks
//! its week as absent.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LaborRules;
use crate::models::{
    AuditStep, BillingMonth, NormalizedAttendanceDetail, ResolvedContract, WeekKey, WeeklyBucket,
};

/// The week buckets of a billing month and the audit step that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAggregation {
    /// Buckets in week order.
    pub buckets: Vec<WeeklyBucket>,
    /// The audit step recording the aggregation.
    pub audit_step: AuditStep,
}

/// The week-of-month key for `date`.
///
/// Week 1 is the week containing the first of the month, with weeks starting
/// on `week_start`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::week_key;
/// use chrono::{NaiveDate, Weekday};
///
/// // October 2025 starts on a Wednesday
/// let first = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// let saturday = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
/// let sunday = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
///
/// assert_eq!(week_key(first, Weekday::Sun).week, 1);
/// assert_eq!(week_key(saturday, Weekday::Sun).week, 1);
/// assert_eq!(week_key(sunday, Weekday::Sun).week, 2);
/// ```
pub fn week_key(date: NaiveDate, week_start: Weekday) -> WeekKey {
    let first_weekday = BillingMonth::containing(date).first_day().weekday();
    let lead_days =
        (first_weekday.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;

    WeekKey {
        year: date.year(),
        month: date.month(),
        week: (date.day0() + lead_days) / 7 + 1,
    }
}

/// Buckets daily hours by week and flags weeks containing an absence.
///
/// Each date adds `min(sum of its work_hours, daily_cap)` to its week, so
/// several events on one date share a single cap. Independently,
/// every day of `month` whose weekday is scheduled in the contract but has no
/// attendance marks its week as absent, even if the week has no hours.
pub fn aggregate_weeks(
    details: &[NormalizedAttendanceDetail],
    contract: &ResolvedContract,
    month: BillingMonth,
    rules: &LaborRules,
    step_number: u32,
) -> WeeklyAggregation {
    let standards = rules.standards();
    let week_start = standards.week_starts_on.weekday();
    let daily_cap = standards.daily_cap_hours;

    // Split shifts on one date share that date's cap
    let mut daily_hours: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for detail in details {
        *daily_hours.entry(detail.date).or_insert(Decimal::ZERO) += detail.work_hours;
    }

    let mut buckets: BTreeMap<WeekKey, WeeklyBucket> = BTreeMap::new();
    for (date, hours) in &daily_hours {
        let key = week_key(*date, week_start);
        let bucket = buckets.entry(key).or_insert_with(|| empty_bucket(key));
        bucket.hours += (*hours).min(daily_cap);
    }
    let attended: BTreeSet<NaiveDate> = daily_hours.keys().copied().collect();

    let mut absent_days = Vec::new();
    for day in month.days() {
        if contract.works_on(day.weekday()) && !attended.contains(&day) {
            let key = week_key(day, week_start);
            buckets
                .entry(key)
                .or_insert_with(|| empty_bucket(key))
                .has_absence = true;
            absent_days.push(day.to_string());
        }
    }

    let buckets: Vec<WeeklyBucket> = buckets.into_values().collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "weekly_aggregation".to_string(),
        rule_name: "Weekly Hours Aggregation".to_string(),
        legal_ref: "LSA Art. 50, 55".to_string(),
        input: serde_json::json!({
            "events": details.len(),
            "days": daily_hours.len(),
            "daily_cap_hours": daily_cap.normalize().to_string(),
            "billing_month": month.to_string()
        }),
        output: serde_json::json!({
            "weeks": buckets.iter().map(|b| serde_json::json!({
                "week": b.key.to_string(),
                "hours": b.hours.normalize().to_string(),
                "has_absence": b.has_absence
            })).collect::<Vec<_>>(),
            "absent_days": absent_days
        }),
        reasoning: format!(
            "Bucketed {} day(s) into {} week(s) capping each day at {} hours; {} scheduled day(s) without attendance",
            daily_hours.len(),
            buckets.len(),
            daily_cap.normalize(),
            absent_days.len()
        ),
    };

    WeeklyAggregation {
        buckets,
        audit_step,
    }
}

fn empty_bucket(key: WeekKey) -> WeeklyBucket {
    WeeklyBucket {
        key,
        hours: Decimal::ZERO,
        has_absence: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{Contract, ScheduleEntry};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn load_rules() -> LaborRules {
        ConfigLoader::load("config/kr").unwrap().into_rules()
    }

    fn contract(days: &[Weekday]) -> ResolvedContract {
        Contract {
            schedule: days
                .iter()
                .map(|weekday| ScheduleEntry {
                    weekday: *weekday,
                    start_time: "09:00".to_string(),
                    end_time: "18:00".to_string(),
                })
                .collect(),
            ..Contract::default()
        }
        .resolve()
    }

    fn detail(date: NaiveDate, hours: &str) -> NormalizedAttendanceDetail {
        NormalizedAttendanceDetail {
            date,
            clock_in: "09:00".to_string(),
            clock_out: Some("18:00".to_string()),
            adjusted_clock_in: "09:00".to_string(),
            adjusted_clock_out: "18:00".to_string(),
            work_hours: dec(hours),
            night_hours: Decimal::ZERO,
            is_holiday: false,
            incentive_pay: Decimal::ZERO,
            in_progress: false,
            work_duration: String::new(),
        }
    }

    fn october() -> BillingMonth {
        BillingMonth::new(2025, 10).unwrap()
    }

    #[test]
    fn test_week_key_monday_start() {
        // 2025-10-05 is a Sunday: still week 1 when weeks start on Monday
        assert_eq!(week_key(date(2025, 10, 5), Weekday::Mon).week, 1);
        assert_eq!(week_key(date(2025, 10, 6), Weekday::Mon).week, 2);
    }

    #[test]
    fn test_week_key_month_starting_on_week_start() {
        // 2025-06-01 is a Sunday
        assert_eq!(week_key(date(2025, 6, 1), Weekday::Sun).week, 1);
        assert_eq!(week_key(date(2025, 6, 7), Weekday::Sun).week, 1);
        assert_eq!(week_key(date(2025, 6, 8), Weekday::Sun).week, 2);
        assert_eq!(week_key(date(2025, 6, 30), Weekday::Sun).week, 5);
    }

    #[test]
    fn test_daily_hours_capped_at_eight() {
        let rules = load_rules();
        let details = vec![detail(date(2025, 10, 13), "9"), detail(date(2025, 10, 14), "12")];

        let result = aggregate_weeks(&details, &contract(&[]), october(), &rules, 1);

        assert_eq!(result.buckets.len(), 1);
        assert_eq!(result.buckets[0].hours, dec("16"));
        assert_eq!(result.buckets[0].key.week, 3);
    }

    #[test]
    fn test_daily_cap_applies_to_the_sum_of_a_day() {
        let rules = load_rules();
        let day = date(2025, 10, 13);
        let details = vec![detail(day, "6"), detail(day, "6"), detail(date(2025, 10, 14), "3")];

        let result = aggregate_weeks(&details, &contract(&[]), october(), &rules, 1);

        assert_eq!(result.buckets.len(), 1);
        assert_eq!(result.buckets[0].hours, dec("11"));
        assert_eq!(result.audit_step.input["days"], 2);
        assert_eq!(result.audit_step.input["events"], 3);
    }

    #[test]
    fn test_short_days_not_padded() {
        let rules = load_rules();
        let details = vec![detail(date(2025, 10, 13), "4.5")];

        let result = aggregate_weeks(&details, &contract(&[]), october(), &rules, 1);

        assert_eq!(result.buckets[0].hours, dec("4.5"));
    }

    #[test]
    fn test_missing_scheduled_day_flags_week() {
        let rules = load_rules();
        // Week 3 of October 2025 runs Sun 12th to Sat 18th
        let details = vec![
            detail(date(2025, 10, 13), "8"),
            detail(date(2025, 10, 14), "8"),
            detail(date(2025, 10, 15), "8"),
        ];
        let contract = contract(&[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu]);

        let result = aggregate_weeks(&details, &contract, october(), &rules, 1);
        let week3 = result.buckets.iter().find(|b| b.key.week == 3).unwrap();

        assert!(week3.has_absence);
        assert_eq!(week3.hours, dec("24"));
    }

    #[test]
    fn test_fully_attended_week_is_not_absent() {
        let rules = load_rules();
        let contract = contract(&[Weekday::Mon, Weekday::Tue]);
        let details = vec![detail(date(2025, 10, 13), "8"), detail(date(2025, 10, 14), "8")];

        let result = aggregate_weeks(&details, &contract, october(), &rules, 1);
        let week3 = result.buckets.iter().find(|b| b.key.week == 3).unwrap();

        assert!(!week3.has_absence);
    }

    #[test]
    fn test_weeks_without_attendance_are_created_absent() {
        let rules = load_rules();
        let contract = contract(&[Weekday::Mon]);

        let result = aggregate_weeks(&[], &contract, october(), &rules, 1);

        // Mondays of October 2025: 6, 13, 20, 27 fall in weeks 2 to 5
        let weeks: Vec<u32> = result.buckets.iter().map(|b| b.key.week).collect();
        assert_eq!(weeks, vec![2, 3, 4, 5]);
        assert!(result.buckets.iter().all(|b| b.has_absence));
        assert!(result.buckets.iter().all(|b| b.hours == Decimal::ZERO));
    }

    #[test]
    fn test_no_schedule_means_no_absences() {
        let rules = load_rules();
        let details = vec![detail(date(2025, 10, 1), "8")];

        let result = aggregate_weeks(&details, &contract(&[]), october(), &rules, 1);

        assert!(result.buckets.iter().all(|b| !b.has_absence));
    }

    #[test]
    fn test_audit_step_lists_absent_days() {
        let rules = load_rules();
        let contract = contract(&[Weekday::Fri]);
        let result = aggregate_weeks(&[], &contract, october(), &rules, 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "weekly_aggregation");
        let absent = result.audit_step.output["absent_days"].as_array().unwrap();
        assert_eq!(absent.len(), 5); // Fridays: 3, 10, 17, 24, 31
    }
}
