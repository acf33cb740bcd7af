//! Validator factories keyed by [`ValidatorKind`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use nestform_model::ValidatorKind;

use super::validator::{NumberValidator, RequiredValidator, Validator};

/// Builds a validator instance.
pub type ValidatorFactory = Arc<dyn Fn() -> Arc<dyn Validator> + Send + Sync>;

/// Maps validator identifiers to factories.
///
/// The registry is handed to every field at construction; fields never look
/// validators up from global state.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use nestform::model::ValidatorKind;
/// use nestform::validation::{NumberValidator, ValidatorRegistry};
///
/// let registry = ValidatorRegistry::default().register(ValidatorKind::Number, || {
///     Arc::new(NumberValidator::with_message("Digits only"))
/// });
/// assert_eq!(registry.create(ValidatorKind::Number).unwrap().message(), "Digits only");
/// ```
#[derive(Clone)]
pub struct ValidatorRegistry {
    factories: HashMap<ValidatorKind, ValidatorFactory>,
}

impl ValidatorRegistry {
    /// Creates a registry with the built-in validators.
    pub fn new() -> Self {
        Self::empty()
            .register(ValidatorKind::Number, || Arc::new(NumberValidator::new()))
            .register(ValidatorKind::Required, || Arc::new(RequiredValidator::new()))
    }

    /// Creates a registry with no validators.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers (or replaces) the factory for `kind`.
    pub fn register<F>(mut self, kind: ValidatorKind, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn Validator> + Send + Sync + 'static,
    {
        self.factories.insert(kind, Arc::new(factory));
        self
    }

    /// Builds a validator of the given kind.
    pub fn create(&self, kind: ValidatorKind) -> Option<Arc<dyn Validator>> {
        self.factories.get(&kind).map(|factory| factory())
    }

    /// Returns `true` if a factory is registered for `kind`.
    pub fn contains(&self, kind: ValidatorKind) -> bool {
        self.factories.contains_key(&kind)
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
