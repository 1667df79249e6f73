//! Error types for the scoring engine

use thiserror::Error;

/// Scoring engine error
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input is outside a documented bound or enumeration
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Offending input field
        field: &'static str,
        /// Human readable reason
        reason: String,
    },

    /// Decision recorder failed to persist a decision
    #[error("Recorder error: {0}")]
    Recorder(String),
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
