//! HTTP API for the payroll engine.
//!
//! The API is a thin shell around the engine: it parses requests, resolves
//! per-store attendance thresholds and serializes results. All pay logic
//! lives in [`crate::calculation`].

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchRequest, ContractRequest, SalaryRequest, ScheduleRequest};
pub use response::{
    ApiError, ApiErrorResponse, BatchResponse, HealthResponse, HolidayResponse, HolidaysResponse,
    ScheduleResponse,
};
pub use state::{AppState, DEFAULT_THRESHOLD_TIMEOUT};
