//! Performance benchmarks for the payroll engine.
//!
//! Covers the engine called directly, the HTTP round trip and the parallel
//! batch path:
//! - One employee, one month of weekday shifts
//! - Attendance normalization alone
//! - `POST /salary/calculate` end to end
//! - Batches of 100 and 1000 employees
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{calculate_batch, calculate_monthly_salary, normalize_attendance_events};
use payroll_engine::clock::{Clock, FixedClock};
use payroll_engine::config::{ConfigLoader, LaborRules};
use payroll_engine::models::{
    AllowanceFlags, AttendanceThresholds, Contract, Employee, InsuranceFlags, RawAttendanceEvent,
    SalaryInput, ScheduleEntry, WageType,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_rules() -> LaborRules {
    ConfigLoader::load("./config/kr")
        .expect("Failed to load config")
        .into_rules()
}

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2025, 10, 31)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap(),
    )
}

fn weekday_contract() -> Contract {
    let schedule = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
        .into_iter()
        .map(|weekday| ScheduleEntry {
            weekday,
            start_time: "09:00".to_string(),
            end_time: "18:00".to_string(),
        })
        .collect();

    Contract {
        wage_type: Some(WageType::Hourly),
        wage_amount: Some(Decimal::from(10030)),
        schedule,
        weekly_hours: Some(Decimal::from(40)),
        start_date: NaiveDate::from_ymd_opt(2023, 3, 1),
        allowances: Some(AllowanceFlags {
            overtime: true,
            night: true,
            holiday: true,
            weekly_rest: true,
        }),
        insurance: Some(InsuranceFlags {
            pension: true,
            health: true,
            employment: true,
            work_injury: true,
        }),
        incentive_hourly_rate: None,
    }
}

/// Every weekday of October 2025, with a late finish on Fridays.
fn october_attendance() -> Vec<RawAttendanceEvent> {
    (1..=31)
        .filter_map(|day| NaiveDate::from_ymd_opt(2025, 10, day))
        .filter(|date| date.weekday().num_days_from_monday() < 5)
        .map(|date| RawAttendanceEvent {
            date,
            clock_in: "08:52".to_string(),
            clock_out: Some(if date.weekday() == Weekday::Fri {
                "23:30".to_string()
            } else {
                "18:03".to_string()
            }),
            incentive_hourly_rate: None,
        })
        .collect()
}

fn salary_input(index: usize) -> SalaryInput {
    SalaryInput {
        employee: Employee {
            id: format!("emp_bench_{:04}", index),
            name: "Bench Worker".to_string(),
            store_id: None,
        },
        contract: weekday_contract(),
        attendance: october_attendance(),
        billing_month: "2025-10".parse().expect("valid billing month"),
        thresholds: Some(AttendanceThresholds::default()),
    }
}

/// Benchmark: One employee, one month.
fn bench_single_month(c: &mut Criterion) {
    let rules = load_rules();
    let clock = clock();
    let input = salary_input(0);

    c.bench_function("single_month", |b| {
        b.iter(|| black_box(calculate_monthly_salary(black_box(&input), &rules, &clock)))
    });
}

/// Benchmark: Attendance normalization for one month.
fn bench_normalization(c: &mut Criterion) {
    let rules = load_rules();
    let input = salary_input(0);
    let contract = input.contract.resolve();
    let thresholds = AttendanceThresholds::default();
    let now = clock().now();

    c.bench_function("normalize_month", |b| {
        b.iter(|| {
            black_box(normalize_attendance_events(
                black_box(&input.attendance),
                &contract,
                &thresholds,
                &rules,
                now,
            ))
        })
    });
}

/// Benchmark: `POST /salary/calculate` through the router.
fn bench_http_calculate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(ConfigLoader::load("./config/kr").expect("Failed to load config"));
    let router = create_router(state);
    let body = serde_json::json!({
        "employee": { "id": "emp_bench_http", "name": "Bench Worker" },
        "contract": {
            "wage_type": "hourly",
            "wage_amount": "10030",
            "work_days": ["mon", "tue", "wed", "thu", "fri"],
            "start_time": "09:00",
            "end_time": "18:00",
            "allowances": { "overtime": true, "night": true }
        },
        "attendance": october_attendance(),
        "billing_month": "2025-10"
    })
    .to_string();

    c.bench_function("http_calculate", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/salary/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Parallel batches of increasing size.
fn bench_batch(c: &mut Criterion) {
    let rules = load_rules();
    let clock = clock();

    let mut group = c.benchmark_group("batch_processing");
    // Large batches take a while per sample
    group.sample_size(10);

    for size in [100usize, 1000].iter() {
        let inputs: Vec<SalaryInput> = (0..*size).map(salary_input).collect();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("employees", size), size, |b, _| {
            b.iter(|| black_box(calculate_batch(&inputs, &rules, &clock)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_month,
    bench_normalization,
    bench_http_calculate,
    bench_batch,
);
criterion_main!(benches);
