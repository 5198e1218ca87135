//! Error types for the Liquidated Damages Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine, its configuration loader and its HTTP
//! adapter can surface.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Liquidated Damages Engine.
///
/// Validation variants are raised before any computation takes place, so a
/// caller never receives a partial result. Retrying with identical inputs is
/// pointless; the input has to be corrected first.
///
/// # Example
///
/// ```
/// use ld_engine::error::EngineError;
///
/// let error = EngineError::DegenerateDuration { days: 0 };
/// assert_eq!(
///     error.to_string(),
///     "Degenerate contract duration: 0 days between start and scheduled completion"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The scheduled completion date precedes the start date.
    #[error("Invalid schedule: scheduled completion {scheduled_completion} is before start {start}")]
    InvalidSchedule {
        /// The contract start date.
        start: NaiveDate,
        /// The scheduled completion date.
        scheduled_completion: NaiveDate,
    },

    /// A monetary input was negative, zero where it must be positive, or unparseable.
    #[error("Invalid amount for '{field}': {message}")]
    InvalidAmount {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the amount invalid.
        message: String,
    },

    /// The contract duration is zero days long.
    #[error("Degenerate contract duration: {days} days between start and scheduled completion")]
    DegenerateDuration {
        /// The computed duration in whole days.
        days: i64,
    },

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

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidAmount`] for the given field.
    pub fn invalid_amount(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidAmount {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds an [`EngineError::CalculationError`] for a decimal overflow.
    pub fn overflow(what: &str) -> Self {
        EngineError::CalculationError {
            message: format!("decimal overflow computing {}", what),
        }
    }

    /// Returns true for errors caused by caller-supplied input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidSchedule { .. }
                | EngineError::InvalidAmount { .. }
                | EngineError::DegenerateDuration { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
