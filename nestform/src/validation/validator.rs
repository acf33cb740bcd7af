//! Built-in validation rules.

use std::fmt::Debug;
use std::sync::LazyLock;

use nestform_model::Value;
use regex::Regex;

use crate::error::ValidationError;

/// Signed integer or decimal, e.g. `-12`, `3.`, `0.25`.
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]*)?$").expect("Invalid number pattern"));

/// A stateless rule applied to a field's raw value.
///
/// `None` is an absent value ("no input provided"). A rule either returns the
/// value, possibly transformed, or fails with its message.
pub trait Validator: Debug + Send + Sync {
    /// The message reported when the rule fails.
    fn message(&self) -> &str;

    /// Check `value`, returning the value to hand to the next rule.
    fn validate(&self, value: Option<Value>) -> Result<Option<Value>, ValidationError>;
}

/// Accepts numbers and strings matching a signed decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberValidator {
    message: String,
}

impl NumberValidator {
    pub const DEFAULT_MESSAGE: &'static str = "A number is expected here";

    pub fn new() -> Self {
        Self::with_message(Self::DEFAULT_MESSAGE)
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for NumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NumberValidator {
    fn message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: Option<Value>) -> Result<Option<Value>, ValidationError> {
        match value {
            Some(v) if v.is_number() => Ok(Some(v)),
            Some(Value::String(s)) if NUMBER_PATTERN.is_match(&s) => Ok(Some(Value::String(s))),
            _ => Err(ValidationError::new(&self.message)),
        }
    }
}

/// Rejects absent values. Empty-but-present values pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    pub const DEFAULT_MESSAGE: &'static str = "Blank value not allowed here";

    pub fn new() -> Self {
        Self::with_message(Self::DEFAULT_MESSAGE)
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: Option<Value>) -> Result<Option<Value>, ValidationError> {
        match value {
            None => Err(ValidationError::new(&self.message)),
            present => Ok(present),
        }
    }
}
