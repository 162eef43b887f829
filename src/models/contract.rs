//! Wage contract models.
//!
//! A [`Contract`] is what arrives from the surrounding application: almost
//! every field may be missing. It is resolved exactly once, via
//! [`Contract::resolve`], into a [`ResolvedContract`] whose fields are all
//! concrete; every calculation step consumes only the resolved form.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the contract's wage amount is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageType {
    /// Amount is paid per hour worked.
    #[default]
    Hourly,
    /// Amount is a fixed monthly salary.
    Monthly,
    /// Amount is a fixed annual salary paid in twelve instalments.
    Annual,
}

/// One scheduled working day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// The weekday this entry applies to.
    pub weekday: Weekday,
    /// Scheduled start, `HH:MM`.
    pub start_time: String,
    /// Scheduled end, `HH:MM`. May be earlier than the start for overnight work.
    pub end_time: String,
}

/// Which premiums the contract grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowanceFlags {
    /// Weekly overtime beyond 40 hours.
    pub overtime: bool,
    /// Night work between 22:00 and 06:00.
    pub night: bool,
    /// Work on statutory holidays.
    pub holiday: bool,
    /// Weekly-rest-day pay.
    pub weekly_rest: bool,
}

impl AllowanceFlags {
    /// Returns true if no premium is granted.
    pub fn none(&self) -> bool {
        !(self.overtime || self.night || self.holiday || self.weekly_rest)
    }
}

/// Which social insurances the employee is enrolled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceFlags {
    /// National pension.
    pub pension: bool,
    /// National health insurance (with long-term care).
    pub health: bool,
    /// Employment insurance.
    pub employment: bool,
    /// Industrial accident (work-injury) insurance. Employer-paid.
    pub work_injury: bool,
}

impl InsuranceFlags {
    /// Returns true if the employee is enrolled in any insurance.
    pub fn any(&self) -> bool {
        self.pension || self.health || self.employment || self.work_injury
    }
}

/// A wage contract as supplied by the caller.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Contract, WageType};
/// use rust_decimal::Decimal;
///
/// let contract: Contract = serde_json::from_str(r#"{
///     "wage_type": "monthly",
///     "wage_amount": "2500000",
///     "schedule": [{ "weekday": "mon", "start_time": "09:00", "end_time": "18:00" }]
/// }"#).unwrap();
///
/// let resolved = contract.resolve();
/// assert_eq!(resolved.wage_type, WageType::Monthly);
/// assert_eq!(resolved.wage_amount, Decimal::from(2_500_000));
/// assert!(resolved.allowances.none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// How the wage is expressed. Defaults to hourly.
    #[serde(default)]
    pub wage_type: Option<WageType>,
    /// The wage amount. Missing means zero.
    #[serde(default)]
    pub wage_amount: Option<Decimal>,
    /// Scheduled working days and times.
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
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
    /// Incentive paid per hour worked, on top of the wage.
    #[serde(default)]
    pub incentive_hourly_rate: Option<Decimal>,
}

impl Contract {
    /// Applies defaults to every missing field.
    pub fn resolve(&self) -> ResolvedContract {
        ResolvedContract {
            wage_type: self.wage_type.unwrap_or_default(),
            wage_amount: self.wage_amount.unwrap_or(Decimal::ZERO),
            schedule: self.schedule.clone(),
            weekly_hours: self.weekly_hours.unwrap_or(Decimal::ZERO),
            start_date: self.start_date,
            allowances: self.allowances.unwrap_or_default(),
            insurance: self.insurance.unwrap_or_default(),
            incentive_hourly_rate: self
                .incentive_hourly_rate
                .filter(|rate| *rate > Decimal::ZERO),
        }
    }
}

/// A contract with every default applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedContract {
    /// How the wage is expressed.
    pub wage_type: WageType,
    /// The wage amount.
    pub wage_amount: Decimal,
    /// Scheduled working days and times.
    pub schedule: Vec<ScheduleEntry>,
    /// Contractual weekly hours.
    pub weekly_hours: Decimal,
    /// The first day of the contract, if known.
    pub start_date: Option<NaiveDate>,
    /// Granted premiums.
    pub allowances: AllowanceFlags,
    /// Insurance enrolment.
    pub insurance: InsuranceFlags,
    /// Positive incentive rate per hour, if any.
    pub incentive_hourly_rate: Option<Decimal>,
}

impl ResolvedContract {
    /// Returns true if the contract pays anything at all.
    pub fn has_wage(&self) -> bool {
        self.wage_amount > Decimal::ZERO
    }

    /// Returns true if `weekday` is a scheduled working day.
    pub fn works_on(&self, weekday: Weekday) -> bool {
        self.schedule.iter().any(|entry| entry.weekday == weekday)
    }

    /// The scheduled window for `weekday`.
    ///
    /// Falls back to the first schedule entry when the weekday itself is not
    /// scheduled, so extra shifts on off days still compare against the
    /// contract's usual hours.
    pub fn window_for(&self, weekday: Weekday) -> Option<&ScheduleEntry> {
        self.schedule
            .iter()
            .find(|entry| entry.weekday == weekday)
            .or_else(|| self.schedule.first())
    }
}
