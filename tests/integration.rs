//! Integration tests for the payroll engine HTTP API.
//!
//! This suite drives the router end to end:
//! - Single-shift, overnight, holiday and salaried months
//! - Insurance deductions
//! - Legacy contract shape
//! - Zero wage and threshold fallback warnings
//! - Batch calculation and schedule generation
//! - Error cases

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::clock::FixedClock;
use payroll_engine::config::ConfigLoader;
use payroll_engine::error::EngineError;
use payroll_engine::thresholds::{ThresholdFuture, ThresholdSource};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/kr").expect("Failed to load config");
    let now = NaiveDate::from_ymd_opt(2025, 10, 31)
        .unwrap()
        .and_hms_opt(17, 30, 0)
        .unwrap();
    AppState::new(config).with_clock(Arc::new(FixedClock::new(now)))
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("not a decimal: {}", other),
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    send(router, "POST", "/salary/calculate", Some(body)).await
}

fn salary_request(contract: Value, attendance: Vec<Value>) -> Value {
    json!({
        "employee": { "id": "emp_001", "name": "Kim Minji" },
        "contract": contract,
        "attendance": attendance,
        "billing_month": "2025-10"
    })
}

fn shift(date: &str, clock_in: &str, clock_out: &str) -> Value {
    json!({ "date": date, "clock_in": clock_in, "clock_out": clock_out })
}

fn warning_codes(result: &Value) -> Vec<String> {
    result["audit_trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Salary scenarios
// =============================================================================

#[tokio::test]
async fn test_single_weekday_shift() {
    let body = salary_request(
        json!({ "wage_type": "hourly", "wage_amount": "10000" }),
        vec![shift("2025-10-15", "09:00", "18:00")],
    );

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&result["earnings"]["base_pay"]), dec("90000"));
    assert_eq!(decimal(&result["hours"]["total_work_hours"]), dec("9"));
    assert_eq!(decimal(&result["earnings"]["total_allowances"]), Decimal::ZERO);
    assert_eq!(decimal(&result["total_pay"]), dec("90000"));
    assert_eq!(result["details"][0]["work_duration"], "9h");
    assert_eq!(result["rules_version"], "2025.1");
}

#[tokio::test]
async fn test_overnight_shift_night_premium() {
    let body = salary_request(
        json!({ "wage_amount": "10000", "allowances": { "night": true } }),
        vec![shift("2025-10-15", "21:00", "06:00")],
    );

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&result["hours"]["total_work_hours"]), dec("9"));
    assert_eq!(decimal(&result["hours"]["night_hours"]), dec("8"));
    assert_eq!(decimal(&result["earnings"]["night_pay"]), dec("40000"));
}

#[tokio::test]
async fn test_hangul_day_holiday_premium() {
    let body = salary_request(
        json!({ "wage_amount": "10000", "allowances": { "holiday": true } }),
        vec![shift("2025-10-09", "09:00", "18:00")],
    );

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["details"][0]["is_holiday"].as_bool().unwrap());
    assert_eq!(decimal(&result["hours"]["holiday_hours"]), dec("9"));
    assert_eq!(decimal(&result["earnings"]["holiday_pay"]), dec("135000"));
    assert_eq!(decimal(&result["total_pay"]), dec("225000"));
}

#[tokio::test]
async fn test_monthly_salary_independent_of_hours() {
    let body = salary_request(
        json!({ "wage_type": "monthly", "wage_amount": "2500000" }),
        vec![
            shift("2025-10-14", "09:00", "18:00"),
            shift("2025-10-15", "09:00", "12:00"),
        ],
    );

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&result["earnings"]["base_pay"]), dec("2500000"));
    assert_eq!(result["wage_type"], "monthly");
}

#[tokio::test]
async fn test_monthly_salary_with_all_insurances() {
    let body = salary_request(
        json!({
            "wage_type": "monthly",
            "wage_amount": "3000000",
            "insurance": { "pension": true, "health": true, "employment": true, "work_injury": true }
        }),
        vec![],
    );

    let (status, result) = post_calculate(create_router_for_test(), body).await;
    let deductions = &result["deductions"];

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&deductions["national_pension"]), dec("135000"));
    assert_eq!(decimal(&deductions["health_insurance"]), dec("106350"));
    assert_eq!(decimal(&deductions["employment_insurance"]), dec("27000"));
    assert_eq!(decimal(&deductions["income_tax"]), dec("99000"));
    assert_eq!(decimal(&deductions["long_term_care"]), dec("6886"));
    assert_eq!(
        decimal(&result["net_pay"]),
        decimal(&result["total_pay"]) - decimal(&deductions["total"])
    );
}

#[tokio::test]
async fn test_annual_salary_converted() {
    let body = salary_request(
        json!({ "wage_type": "annual", "wage_amount": "36000000" }),
        vec![],
    );

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&result["earnings"]["base_pay"]), dec("3000000"));
}

#[tokio::test]
async fn test_legacy_contract_shape() {
    // Mon/Wed/Fri 10:00-16:00; an 09:50 arrival snaps to the schedule
    let body = salary_request(
        json!({
            "wage_amount": "10000",
            "work_days": ["mon", "wed", "fri"],
            "start_time": "10:00",
            "end_time": "16:00"
        }),
        vec![shift("2025-10-15", "09:50", "16:02")],
    );

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["details"][0]["adjusted_clock_in"], "10:00");
    assert_eq!(result["details"][0]["adjusted_clock_out"], "16:00");
    assert_eq!(decimal(&result["hours"]["total_work_hours"]), dec("6"));
}

#[tokio::test]
async fn test_legacy_contract_missing_times_rejected() {
    let body = salary_request(
        json!({ "wage_amount": "10000", "work_days": ["mon"] }),
        vec![],
    );

    let (status, error) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_SCHEDULE");
}

#[tokio::test]
async fn test_zero_wage_returns_zeroed_result() {
    let body = salary_request(
        json!({ "wage_type": "hourly" }),
        vec![shift("2025-10-15", "09:00", "18:00")],
    );

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&result["total_pay"]), Decimal::ZERO);
    assert_eq!(decimal(&result["net_pay"]), Decimal::ZERO);
    assert!(warning_codes(&result).contains(&"ZERO_WAGE".to_string()));
}

#[tokio::test]
async fn test_malformed_time_degrades_to_zero_hours() {
    let body = salary_request(
        json!({ "wage_amount": "10000" }),
        vec![shift("2025-10-15", "nine", "ten")],
    );

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&result["hours"]["total_work_hours"]), Decimal::ZERO);
    assert_eq!(decimal(&result["total_pay"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_open_shift_uses_clock() {
    let body = salary_request(
        json!({ "wage_amount": "10000" }),
        vec![json!({ "date": "2025-10-31", "clock_in": "09:00" })],
    );

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["details"][0]["in_progress"].as_bool().unwrap());
    assert_eq!(decimal(&result["hours"]["total_work_hours"]), dec("8.5"));
}

// =============================================================================
// Thresholds
// =============================================================================

#[tokio::test]
async fn test_store_thresholds_applied() {
    // store_hongdae tolerates clock-outs up to 30 minutes late
    let mut body = salary_request(
        json!({
            "wage_amount": "10000",
            "schedule": [{ "weekday": "wed", "start_time": "09:00", "end_time": "18:00" }]
        }),
        vec![shift("2025-10-15", "09:00", "18:20")],
    );
    body["employee"]["store_id"] = json!("store_hongdae");

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["details"][0]["adjusted_clock_out"], "18:00");
    assert!(warning_codes(&result).is_empty());
}

#[tokio::test]
async fn test_unknown_store_falls_back_with_warning() {
    let mut body = salary_request(
        json!({
            "wage_amount": "10000",
            "schedule": [{ "weekday": "wed", "start_time": "09:00", "end_time": "18:00" }]
        }),
        vec![shift("2025-10-15", "09:00", "18:20")],
    );
    body["employee"]["store_id"] = json!("store_unknown");

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["details"][0]["adjusted_clock_out"], "18:20");
    assert!(warning_codes(&result).contains(&"THRESHOLD_FALLBACK".to_string()));
}

struct HangingSource;

impl ThresholdSource for HangingSource {
    fn lookup<'a>(&'a self, _store_id: &'a str) -> ThresholdFuture<'a> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Err(EngineError::ThresholdLookupFailed {
                store_id: "store_gangnam".to_string(),
                message: "unreachable".to_string(),
            })
        })
    }
}

#[tokio::test]
async fn test_threshold_timeout_does_not_block_payroll() {
    let state = create_test_state()
        .with_threshold_source(Arc::new(HangingSource))
        .with_threshold_timeout(Duration::from_millis(20));
    let mut body = salary_request(
        json!({ "wage_amount": "10000" }),
        vec![shift("2025-10-15", "09:00", "18:00")],
    );
    body["employee"]["store_id"] = json!("store_gangnam");

    let (status, result) = post_calculate(create_router(state), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&result["total_pay"]), dec("90000"));
    assert!(warning_codes(&result).contains(&"THRESHOLD_FALLBACK".to_string()));
}

#[tokio::test]
async fn test_explicit_thresholds_override_store() {
    let mut body = salary_request(
        json!({
            "wage_amount": "10000",
            "schedule": [{ "weekday": "wed", "start_time": "09:00", "end_time": "18:00" }]
        }),
        vec![shift("2025-10-15", "09:00", "18:20")],
    );
    body["employee"]["store_id"] = json!("store_hongdae");
    body["thresholds"] = json!({ "late_clock_out_minutes": 10 });

    let (_, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(result["details"][0]["adjusted_clock_out"], "18:20");
}

// =============================================================================
// Batch, schedule, holidays, health
// =============================================================================

#[tokio::test]
async fn test_batch_returns_results_in_order() {
    let body = json!({
        "requests": [
            salary_request(json!({ "wage_amount": "10000" }), vec![shift("2025-10-15", "09:00", "18:00")]),
            salary_request(json!({ "wage_type": "monthly", "wage_amount": "2500000" }), vec![]),
            salary_request(json!({}), vec![])
        ]
    });

    let (status, response) = send(create_router_for_test(), "POST", "/salary/batch", Some(body)).await;
    let results = response["results"].as_array().unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(results.len(), 3);
    assert_eq!(decimal(&results[0]["total_pay"]), dec("90000"));
    assert_eq!(decimal(&results[1]["total_pay"]), dec("2500000"));
    assert!(warning_codes(&results[2]).contains(&"ZERO_WAGE".to_string()));
}

#[tokio::test]
async fn test_batch_rejects_invalid_member() {
    let body = json!({
        "requests": [
            salary_request(json!({ "wage_amount": "10000" }), vec![]),
            salary_request(json!({ "work_days": ["mon"] }), vec![])
        ]
    });

    let (status, error) = send(create_router_for_test(), "POST", "/salary/batch", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"], "requests[1]");
}

#[tokio::test]
async fn test_batch_store_lookups_share_one_timeout() {
    let state = create_test_state()
        .with_threshold_source(Arc::new(HangingSource))
        .with_threshold_timeout(Duration::from_millis(200));
    let requests: Vec<Value> = (0..10)
        .map(|i| {
            let mut body = salary_request(
                json!({ "wage_amount": "10000" }),
                vec![shift("2025-10-15", "09:00", "18:00")],
            );
            body["employee"]["id"] = json!(format!("emp_{:03}", i));
            body["employee"]["store_id"] = json!(format!("store_{}", i % 4));
            body
        })
        .collect();

    let started = Instant::now();
    let (status, response) = send(
        create_router(state),
        "POST",
        "/salary/batch",
        Some(json!({ "requests": requests })),
    )
    .await;
    let elapsed = started.elapsed();
    let results = response["results"].as_array().unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(elapsed < Duration::from_millis(1000), "batch took {:?}", elapsed);
    assert_eq!(results.len(), 10);
    for result in results {
        assert_eq!(decimal(&result["total_pay"]), dec("90000"));
        assert!(warning_codes(result).contains(&"THRESHOLD_FALLBACK".to_string()));
    }
}

/// Records each store id it is asked for.
#[derive(Default)]
struct CountingSource {
    lookups: Mutex<Vec<String>>,
}

impl ThresholdSource for CountingSource {
    fn lookup<'a>(&'a self, store_id: &'a str) -> ThresholdFuture<'a> {
        Box::pin(async move {
            self.lookups.lock().unwrap().push(store_id.to_string());
            Ok(None)
        })
    }
}

#[tokio::test]
async fn test_batch_looks_up_each_store_once() {
    let source = Arc::new(CountingSource::default());
    let state = create_test_state().with_threshold_source(source.clone());
    let mut explicit = salary_request(json!({ "wage_amount": "10000" }), vec![]);
    explicit["employee"]["store_id"] = json!("store_explicit");
    explicit["thresholds"] = json!({
        "early_clock_in_minutes": 0,
        "early_clock_out_tolerance_minutes": 0,
        "late_clock_out_minutes": 0
    });
    let mut requests = vec![explicit, salary_request(json!({ "wage_amount": "10000" }), vec![])];
    for store_id in ["store_a", "store_b", "store_a", "store_a"] {
        let mut body = salary_request(json!({ "wage_amount": "10000" }), vec![]);
        body["employee"]["store_id"] = json!(store_id);
        requests.push(body);
    }

    let (status, response) = send(
        create_router(state),
        "POST",
        "/salary/batch",
        Some(json!({ "requests": requests })),
    )
    .await;
    let results = response["results"].as_array().unwrap();

    assert_eq!(status, StatusCode::OK);
    let mut lookups = source.lookups.lock().unwrap().clone();
    lookups.sort();
    assert_eq!(lookups, vec!["store_a".to_string(), "store_b".to_string()]);
    assert!(!warning_codes(&results[0]).contains(&"THRESHOLD_FALLBACK".to_string()));
    for result in &results[1..] {
        assert!(warning_codes(result).contains(&"THRESHOLD_FALLBACK".to_string()));
    }
}

#[tokio::test]
async fn test_schedule_generation() {
    let body = json!({
        "contract": {
            "work_days": ["mon", "tue", "wed", "thu", "fri"],
            "start_time": "09:00",
            "end_time": "18:00"
        },
        "billing_month": "2025-10"
    });

    let (status, response) =
        send(create_router_for_test(), "POST", "/schedule/generate", Some(body)).await;
    let shifts = response["shifts"].as_array().unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(shifts.len(), 23);
    assert_eq!(decimal(&response["total_scheduled_hours"]), dec("207"));
    let holidays = shifts
        .iter()
        .filter(|s| s["is_holiday"].as_bool().unwrap())
        .count();
    // Oct 3 and Oct 6 to 9 fall on weekdays
    assert_eq!(holidays, 5);
}

#[tokio::test]
async fn test_holidays_endpoint() {
    let (status, response) = send(create_router_for_test(), "GET", "/holidays/2025", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response["covered"].as_bool().unwrap());
    assert!(
        response["holidays"]
            .as_array()
            .unwrap()
            .iter()
            .any(|h| h["date"] == "2025-10-09")
    );

    let (_, stale) = send(create_router_for_test(), "GET", "/holidays/2031", None).await;
    assert!(!stale["covered"].as_bool().unwrap());
}

#[tokio::test]
async fn test_health() {
    let (status, response) = send(create_router_for_test(), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["jurisdiction"], "KR");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/salary/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_employee_is_validation_error() {
    let body = json!({ "contract": {}, "billing_month": "2025-10" });

    let (status, error) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_billing_month_rejected() {
    let mut body = salary_request(json!({ "wage_amount": "10000" }), vec![]);
    body["billing_month"] = json!("2025-13");

    let (status, error) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("2025-13"));
}
