//! RecordError for Record accessors

/// Error type for typed attribute access on a [`Record`](crate::Record).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The requested attribute does not exist in the record.
    #[error("Attribute '{field}' not found in record")]
    Missing { field: String },

    /// The attribute exists but has a different type than requested.
    #[error("Attribute '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl RecordError {
    /// Creates a new missing attribute error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

/// Error raised while loading a [`Schema`](crate::Schema).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two attribute definitions share one name.
    #[error("Attribute '{name}' is defined more than once")]
    DuplicateAttribute { name: String },
}
