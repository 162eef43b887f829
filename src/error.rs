//! Error types for the payroll engine.
//!
//! The salary calculation itself never fails: degenerate inputs degrade to
//! zero. These errors cover the boundary around it, namely configuration
//! loading, request parsing and the external threshold lookup.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/labor.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/labor.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A billing month string was not a valid `YYYY-MM` value.
    #[error("Invalid billing month '{value}': expected YYYY-MM")]
    InvalidBillingMonth {
        /// The rejected value.
        value: String,
    },

    /// A contract schedule could not be normalized.
    #[error("Invalid schedule: {message}")]
    InvalidSchedule {
        /// A description of what made the schedule invalid.
        message: String,
    },

    /// The per-location threshold lookup failed.
    #[error("Threshold lookup failed for store '{store_id}': {message}")]
    ThresholdLookupFailed {
        /// The store whose policy was requested.
        store_id: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
