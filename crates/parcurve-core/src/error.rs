//! Error types for the core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by date, tenor, and schedule handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A date that does not exist on the calendar, or an out-of-range result.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A tenor string that cannot be parsed ("3M", "5Y", ...).
    #[error("Invalid tenor '{input}': {reason}")]
    InvalidTenor {
        /// The offending input string.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A schedule that cannot be generated from the given parameters.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of the problem.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }
}
