//! Field validation rules.
//!
//! A [`Validator`] is a stateless rule over a raw value. Fields hold an ordered
//! list of them, obtained from a [`ValidatorRegistry`] at construction, and run
//! them with [`run_validators`].
//!
//! # Example
//!
//! ```
//! use nestform::model::{Value, ValidatorKind};
//! use nestform::validation::{run_validators, ValidatorRegistry};
//!
//! let registry = ValidatorRegistry::default();
//! let chain = vec![
//!     registry.create(ValidatorKind::Required).unwrap(),
//!     registry.create(ValidatorKind::Number).unwrap(),
//! ];
//!
//! let value = run_validators(Some(Value::from("12")), &chain, true).unwrap();
//! assert_eq!(value, Some(Value::from("12")));
//!
//! let err = run_validators(None, &chain, true).unwrap_err();
//! assert_eq!(err.message, "Blank value not allowed here");
//! ```

mod chain;
mod registry;
mod validator;

pub use chain::run_validators;
pub use registry::{ValidatorFactory, ValidatorRegistry};
pub use validator::{NumberValidator, RequiredValidator, Validator};
