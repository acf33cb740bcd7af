//! Engine error types

use nestform_model::ValidatorKind;
use thiserror::Error;

/// A single field's raw value failed a validation rule.
///
/// Never escapes a field: [`Leaf::validate`](crate::field::Leaf::validate) turns it
/// into a `Fail` signal carrying the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A field tree could not be built.
///
/// Returned from construction; no partially built tree is handed out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// None of record instance, model class or raw schema was provided.
    #[error("Could not find a schema for form '{name}'")]
    MissingSchema { name: String },

    /// A list was configured without a row model class.
    #[error("Could not find model class for list '{name}'")]
    MissingListModel { name: String },

    /// A field subset names an attribute the schema does not define.
    #[error("Field '{field}' is not defined by the schema of '{name}'")]
    UnknownField { name: String, field: String },

    /// Two children of one composite share a name.
    #[error("Field '{field}' is defined more than once in '{name}'")]
    DuplicateField { name: String, field: String },

    /// Initial data has the wrong shape for the field kind.
    #[error("Initial data for '{name}' must be {expected}, got {actual}")]
    InvalidInitialData {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The validator registry has no factory for a requested validator.
    #[error("No validator registered for {kind:?}")]
    MissingValidator { kind: ValidatorKind },
}
