//! Response types for the payroll engine API.
//!
//! This module defines the success bodies that wrap engine output and the
//! error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::PlannedShift;
use crate::error::EngineError;
use crate::models::{BillingMonth, MonthlySalaryResult};

/// Response body for `POST /salary/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    /// One result per request, in request order.
    pub results: Vec<MonthlySalaryResult>,
}

/// Response body for `POST /schedule/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// The month the schedule covers.
    pub billing_month: BillingMonth,
    /// Planned shifts in date order.
    pub shifts: Vec<PlannedShift>,
    /// Sum of scheduled hours.
    pub total_scheduled_hours: Decimal,
}

/// One holiday in `GET /holidays/:year`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayResponse {
    /// The holiday's date.
    pub date: NaiveDate,
    /// The holiday's name.
    pub name: String,
}

/// Response body for `GET /holidays/:year`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidaysResponse {
    /// The requested year.
    pub year: i32,
    /// Whether a holiday table is configured for the year.
    pub covered: bool,
    /// The year's holidays in date order.
    pub holidays: Vec<HolidayResponse>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the service is up.
    pub status: String,
    /// The engine's crate version.
    pub engine_version: String,
    /// The loaded jurisdiction code.
    pub jurisdiction: String,
    /// The loaded labor rules version.
    pub rules_version: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::ConfigParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration parse error", message),
            },
            EngineError::InvalidBillingMonth { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_BILLING_MONTH", message))
            }
            EngineError::InvalidSchedule { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_SCHEDULE",
                    message,
                    "Provide either a schedule list or work_days with start_time and end_time",
                ),
            ),
            EngineError::ThresholdLookupFailed { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::new("THRESHOLD_LOOKUP_FAILED", message),
            },
        }
    }
}
