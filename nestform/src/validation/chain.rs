use std::sync::Arc;

use log::trace;
use nestform_model::Value;

use super::Validator;
use crate::error::ValidationError;

/// Run `validators` over `value` in declaration order.
///
/// A validator is skipped only when the value is absent and the field is not
/// required. The first failure short-circuits the chain.
pub fn run_validators(
    value: Option<Value>,
    validators: &[Arc<dyn Validator>],
    required: bool,
) -> Result<Option<Value>, ValidationError> {
    let mut value = value;
    for validator in validators {
        if required || value.is_some() {
            trace!("[validate] applying {:?} to {:?}", validator, value);
            value = validator.validate(value)?;
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{NumberValidator, RequiredValidator};

    /// Uppercases strings, to observe values flowing through the chain.
    #[derive(Debug)]
    struct Upper;

    impl Validator for Upper {
        fn message(&self) -> &str {
            "never"
        }

        fn validate(&self, value: Option<Value>) -> Result<Option<Value>, ValidationError> {
            Ok(value.map(|v| match v {
                Value::String(s) => Value::String(s.to_uppercase()),
                other => other,
            }))
        }
    }

    fn chain() -> Vec<Arc<dyn Validator>> {
        vec![Arc::new(RequiredValidator::new()), Arc::new(NumberValidator::new())]
    }

    #[test]
    fn test_absent_optional_skips_everything() {
        let number_only: Vec<Arc<dyn Validator>> = vec![Arc::new(NumberValidator::new())];
        assert_eq!(run_validators(None, &number_only, false), Ok(None));
    }

    #[test]
    fn test_absent_required_fails_on_required() {
        let err = run_validators(None, &chain(), true).unwrap_err();
        assert_eq!(err.message, "Blank value not allowed here");
    }

    #[test]
    fn test_first_failure_short_circuits() {
        let validators: Vec<Arc<dyn Validator>> = vec![Arc::new(NumberValidator::new()), Arc::new(Upper)];
        let err = run_validators(Some(Value::from("abc")), &validators, false).unwrap_err();
        assert_eq!(err.message, "A number is expected here");
    }

    #[test]
    fn test_values_flow_through_chain() {
        let validators: Vec<Arc<dyn Validator>> = vec![Arc::new(Upper), Arc::new(RequiredValidator::new())];
        let value = run_validators(Some(Value::from("ann")), &validators, false).unwrap();
        assert_eq!(value, Some(Value::from("ANN")));
    }
}
