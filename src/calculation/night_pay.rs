//! Night work premium.

use rust_decimal::Decimal;

use crate::config::LaborRules;
use crate::models::{AllowanceFlags, AuditStep, NormalizedAttendanceDetail};

use super::premium::PremiumResult;
use super::rounding::round_won;

/// Calculates the night work premium.
///
/// Night hours are only recorded on details when the night allowance is
/// granted, so an ungranted contract always sums to zero hours here.
pub fn calculate_night_pay(
    details: &[NormalizedAttendanceDetail],
    hourly_wage: Decimal,
    allowances: &AllowanceFlags,
    rules: &LaborRules,
    step_number: u32,
) -> PremiumResult {
    let standards = rules.standards();
    let multiplier = standards.night.multiplier;
    let hours: Decimal = details.iter().map(|detail| detail.night_hours).sum();

    let pay = if allowances.night {
        round_won(hours * hourly_wage * multiplier)
    } else {
        Decimal::ZERO
    };

    let reasoning = if allowances.night {
        format!(
            "{} hours between {} and {} × {} × {} = {}",
            hours.normalize(),
            standards.night_window.start,
            standards.night_window.end,
            hourly_wage.round_dp(2).normalize(),
            multiplier.normalize(),
            pay
        )
    } else {
        "Night allowance not granted".to_string()
    };

    PremiumResult {
        hours,
        pay,
        audit_step: AuditStep {
            step_number,
            rule_id: "night_pay".to_string(),
            rule_name: "Night Work Premium".to_string(),
            legal_ref: "LSA Art. 56(3)".to_string(),
            input: serde_json::json!({
                "granted": allowances.night,
                "night_window": format!("{}-{}", standards.night_window.start, standards.night_window.end),
                "multiplier": multiplier.normalize().to_string()
            }),
            output: serde_json::json!({
                "night_hours": hours.normalize().to_string(),
                "night_pay": pay.to_string()
            }),
            reasoning,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn detail(day: u32, work: &str, night: &str) -> NormalizedAttendanceDetail {
        NormalizedAttendanceDetail {
            date: NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
            clock_in: "21:00".to_string(),
            clock_out: Some("06:00".to_string()),
            adjusted_clock_in: "21:00".to_string(),
            adjusted_clock_out: "06:00".to_string(),
            work_hours: dec(work),
            night_hours: dec(night),
            is_holiday: false,
            incentive_pay: Decimal::ZERO,
            in_progress: false,
            work_duration: "9h".to_string(),
        }
    }

    #[test]
    fn test_overnight_shift_night_premium() {
        let rules = ConfigLoader::load("config/kr").unwrap().into_rules();
        let flags = AllowanceFlags {
            night: true,
            ..AllowanceFlags::default()
        };

        let result = calculate_night_pay(&[detail(15, "9", "8")], dec("10000"), &flags, &rules, 1);

        assert_eq!(result.hours, dec("8"));
        assert_eq!(result.pay, dec("40000"));
    }

    #[test]
    fn test_night_hours_summed_over_days() {
        let rules = ConfigLoader::load("config/kr").unwrap().into_rules();
        let flags = AllowanceFlags {
            night: true,
            ..AllowanceFlags::default()
        };
        let details = vec![detail(14, "9", "8"), detail(15, "3", "1.5")];

        let result = calculate_night_pay(&details, dec("10030"), &flags, &rules, 1);

        // 9.5 × 10030 × 0.5 = 47642.5
        assert_eq!(result.pay, dec("47643"));
    }

    #[test]
    fn test_flag_off_pays_nothing() {
        let rules = ConfigLoader::load("config/kr").unwrap().into_rules();
        let result = calculate_night_pay(
            &[detail(15, "9", "0")],
            dec("10000"),
            &AllowanceFlags::default(),
            &rules,
            1,
        );
        assert_eq!(result.pay, Decimal::ZERO);
        assert_eq!(result.audit_step.reasoning, "Night allowance not granted");
    }
}
