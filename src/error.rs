//! Error types for the PAYE engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tax rules,
//! validating input, or computing a tax liability.

use thiserror::Error;

/// The main error type for the PAYE engine.
///
/// All fallible operations in the engine return this error type. Callers at
/// the boundary (HTTP handler, CLI) decide whether a variant is the caller's
/// fault via [`EngineError::is_client_error`].
///
/// # Example
///
/// ```
/// use paye_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "grossIncome".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'grossIncome': must not be negative");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A calculation input field was missing, non-numeric or negative.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The wire name of the offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A classifier or assessment answer was not one of the accepted options.
    #[error("Invalid profile field '{field}': {message}")]
    InvalidProfile {
        /// The wire name of the offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Rules file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Rules file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A bracket table does not partition `[0, ∞)` progressively.
    #[error("Invalid tax schedule: {message}")]
    InvalidSchedule {
        /// A description of the broken invariant.
        message: String,
    },

    /// An unexpected failure during computation.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Creates an [`EngineError::InvalidInput`] for the given wire field.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an [`EngineError::CalculationError`].
    pub fn calculation(message: impl Into<String>) -> Self {
        Self::CalculationError {
            message: message.into(),
        }
    }

    /// Returns true when the error was caused by the caller's input rather
    /// than by the engine or its configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput { .. } | EngineError::InvalidProfile { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
