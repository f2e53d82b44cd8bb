//! Error types for plan building and value generation.
//!
//! Every failure is fatal for the run: callers get a `GenError` naming the
//! field or constraint that failed and no partial output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// Missing attribute, unsupported type, malformed range/rotation/format.
    #[error("Invalid configuration for field '{field}': {message}")]
    Config { field: String, message: String },

    /// A config-level problem that is not tied to a single field.
    #[error("Invalid configuration: {0}")]
    Plan(String),

    /// Requested rotation cannot be satisfied by the field's value domain.
    #[error("Rotation not feasible for field '{field}': {message}")]
    Infeasible { field: String, message: String },

    /// A bounded random-retry loop hit its attempt ceiling.
    #[error("Gave up on {what} after {attempts} attempts")]
    Exhausted { what: String, attempts: u64 },

    /// Invalid arguments to the random distribution partition.
    #[error("Invalid distribution: {0}")]
    Distribution(String),

    /// The external generator collaborator failed.
    #[error("External generator '{generator}' failed for field '{field}': {message}")]
    External {
        field: String,
        generator: String,
        message: String,
    },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        GenError::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infeasible(field: impl Into<String>, message: impl Into<String>) -> Self {
        GenError::Infeasible {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for errors raised before any value was generated.
    pub fn is_config(&self) -> bool {
        matches!(self, GenError::Config { .. } | GenError::Plan(_))
    }
}

pub type Result<T, E = GenError> = std::result::Result<T, E>;
