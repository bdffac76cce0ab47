//! Error types for the pay statement engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building a schedule,
//! accruing year-to-date earnings, or handing records to a renderer.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the pay statement engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use paystub_engine::error::EngineError;
///
/// let error = EngineError::InvalidSchedule {
///     field: "cadence_days".to_string(),
///     message: "must be greater than zero".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid schedule field 'cadence_days': must be greater than zero"
/// );
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

    /// The pay schedule configuration is unusable. Raised before any period
    /// is generated.
    #[error("Invalid schedule field '{field}': {message}")]
    InvalidSchedule {
        /// The configuration field at fault.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A pay date was handed to the accrual tracker out of ascending order.
    #[error("Pay date {received} is not after previously accrued pay date {previous}")]
    OutOfOrderPayDate {
        /// The last pay date the tracker accepted.
        previous: NaiveDate,
        /// The pay date that was rejected.
        received: NaiveDate,
    },

    /// A renderer failed to produce the artifact for one statement.
    #[error("Failed to render '{artifact}': {message}")]
    RenderFailed {
        /// The artifact name of the statement that failed.
        artifact: String,
        /// A description of the failure.
        message: String,
    },

    /// The HTTP server could not bind or stopped with an I/O error.
    #[error("Server error on {addr}: {message}")]
    Server {
        /// The address the server was bound, or binding, to.
        addr: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidSchedule`].
    pub fn invalid_schedule(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidSchedule {
            field: field.into(),
            message: message.into(),
        }
    }
}
