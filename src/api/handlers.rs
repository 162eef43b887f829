//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeSet;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_batch, calculate_monthly_salary, generate_schedule};
use crate::models::{AuditWarning, Contract, MonthlySalaryResult, SalaryInput};
use crate::thresholds::{resolve_store_thresholds, resolve_thresholds};

use super::request::{BatchRequest, SalaryRequest, ScheduleRequest};
use super::response::{
    ApiError, ApiErrorResponse, BatchResponse, HealthResponse, HolidayResponse, HolidaysResponse,
    ScheduleResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/salary/calculate", post(calculate_handler))
        .route("/salary/batch", post(batch_handler))
        .route("/schedule/generate", post(schedule_handler))
        .route("/holidays/:year", get(holidays_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for POST /salary/calculate.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let input = match SalaryInput::try_from(request) {
        Ok(input) => input,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid salary request");
            return error_response(ApiErrorResponse::from(err));
        }
    };

    let (input, fallback) = with_resolved_thresholds(&state, input).await;
    let mut result = calculate_monthly_salary(&input, state.rules(), state.clock().as_ref());
    attach_warning(&mut result, fallback);

    info!(
        correlation_id = %correlation_id,
        employee_id = %result.employee_id,
        billing_month = %result.billing_month,
        workdays = result.hours.workday_count,
        total_pay = %result.total_pay,
        net_pay = %result.net_pay,
        warnings = result.audit_trace.warnings.len(),
        duration_us = result.audit_trace.duration_us,
        "Salary calculated"
    );

    json_response(StatusCode::OK, &result)
}

/// Handler for POST /salary/batch.
///
/// Store thresholds are looked up once per distinct store, all at the same
/// time, then every calculation runs in parallel off the async runtime.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch salary request");

    let batch = match payload {
        Ok(Json(batch)) => batch,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let mut inputs = Vec::with_capacity(batch.requests.len());
    for (index, request) in batch.requests.into_iter().enumerate() {
        match SalaryInput::try_from(request) {
            Ok(input) => inputs.push(input),
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    index,
                    error = %err,
                    "Invalid request in batch"
                );
                let mut response = ApiErrorResponse::from(err);
                response.error.details = Some(format!("requests[{}]", index));
                return error_response(response);
            }
        }
    }

    let store_ids: BTreeSet<String> = inputs
        .iter()
        .filter(|input| input.thresholds.is_none())
        .filter_map(|input| input.employee.store_id.clone())
        .collect();
    let by_store = resolve_store_thresholds(
        store_ids,
        state.shared_threshold_source(),
        state.threshold_timeout(),
    )
    .await;

    let mut fallbacks = Vec::with_capacity(inputs.len());
    for input in &mut inputs {
        let looked_up = match (input.thresholds, input.employee.store_id.as_deref()) {
            (None, Some(store_id)) => by_store.get(store_id).cloned(),
            _ => None,
        };
        let resolved = match looked_up {
            Some(resolved) => resolved,
            // Explicit thresholds or no store: settles without a lookup
            None => {
                resolve_thresholds(
                    input.thresholds,
                    input.employee.store_id.as_deref(),
                    state.threshold_source(),
                    state.threshold_timeout(),
                )
                .await
            }
        };
        input.thresholds = Some(resolved.thresholds);
        fallbacks.push(resolved.warning);
    }

    let rules = state.shared_rules();
    let clock = state.clock();
    let count = inputs.len();

    let results = match tokio::task::spawn_blocking(move || {
        calculate_batch(&inputs, &rules, clock.as_ref())
    })
    .await
    {
        Ok(results) => results,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Batch calculation aborted");
            return error_response(ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("CALCULATION_ERROR", "Batch calculation aborted"),
            });
        }
    };

    let results: Vec<MonthlySalaryResult> = results
        .into_iter()
        .zip(fallbacks)
        .map(|(mut result, fallback)| {
            attach_warning(&mut result, fallback);
            result
        })
        .collect();

    let total_pay: Decimal = results.iter().map(|result| result.total_pay).sum();
    info!(
        correlation_id = %correlation_id,
        count,
        total_pay = %total_pay,
        "Batch calculated"
    );

    json_response(StatusCode::OK, &BatchResponse { results })
}

/// Handler for POST /schedule/generate.
async fn schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let contract = match Contract::try_from(request.contract) {
        Ok(contract) => contract.resolve(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid schedule request");
            return error_response(ApiErrorResponse::from(err));
        }
    };

    let shifts = generate_schedule(&contract, request.billing_month, state.rules().holidays());
    let total_scheduled_hours = shifts.iter().map(|shift| shift.scheduled_hours).sum();

    info!(
        correlation_id = %correlation_id,
        billing_month = %request.billing_month,
        shifts = shifts.len(),
        "Schedule generated"
    );

    json_response(
        StatusCode::OK,
        &ScheduleResponse {
            billing_month: request.billing_month,
            shifts,
            total_scheduled_hours,
        },
    )
}

/// Handler for GET /holidays/:year.
async fn holidays_handler(State(state): State<AppState>, Path(year): Path<i32>) -> Response {
    let calendar = state.rules().holidays();
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
            format!("Year {} is out of range", year),
        )));
    };

    let holidays = calendar
        .holidays_between(start, end)
        .map(|(date, name)| HolidayResponse {
            date,
            name: name.to_string(),
        })
        .collect();

    json_response(
        StatusCode::OK,
        &HolidaysResponse {
            year,
            covered: calendar.covers_year(year),
            holidays,
        },
    )
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Response {
    let metadata = state.rules().metadata();
    json_response(
        StatusCode::OK,
        &HealthResponse {
            status: "ok".to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            jurisdiction: metadata.code.clone(),
            rules_version: metadata.version.clone(),
        },
    )
}

/// Fills in the input's thresholds from the store policy when none were given.
async fn with_resolved_thresholds(
    state: &AppState,
    mut input: SalaryInput,
) -> (SalaryInput, Option<AuditWarning>) {
    let resolved = resolve_thresholds(
        input.thresholds,
        input.employee.store_id.as_deref(),
        state.threshold_source(),
        state.threshold_timeout(),
    )
    .await;
    input.thresholds = Some(resolved.thresholds);
    (input, resolved.warning)
}

fn attach_warning(result: &mut MonthlySalaryResult, warning: Option<AuditWarning>) {
    if let Some(warning) = warning {
        result.audit_trace.warnings.push(warning);
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, &api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    error_response(ApiErrorResponse::bad_request(error))
}
