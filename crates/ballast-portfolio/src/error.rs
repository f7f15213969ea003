//! Error types for portfolio diagnostics.
//!
//! Data-quality problems (missing or non-numeric fields) never surface here;
//! they degrade the affected holding to "excluded from the aggregate". Only
//! structural problems with a payload, configuration or scenario do.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone)]
pub enum PortfolioError {
    /// The payload does not have the expected shape.
    #[error("Invalid payload: {reason}")]
    InvalidPayload {
        /// The reason the payload is invalid.
        reason: String,
    },

    /// A required top-level key is absent from the payload.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// A scenario definition cannot be applied.
    #[error("Invalid scenario '{id}': {reason}")]
    InvalidScenario {
        /// The scenario identifier.
        id: String,
        /// The reason the scenario is invalid.
        reason: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {reason}")]
    Config {
        /// The reason the configuration was rejected.
        reason: String,
    },
}

impl PortfolioError {
    /// Create an invalid payload error.
    #[must_use]
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid scenario error.
    #[must_use]
    pub fn invalid_scenario(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidScenario {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
