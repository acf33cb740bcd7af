//! Form configuration

use crate::validation::ValidatorRegistry;

/// Configuration shared by every field of a form.
///
/// # Example
///
/// ```
/// use nestform::config::FormConfig;
///
/// let config = FormConfig::default()
///     .with_id_prefix("signup_")
///     .with_field_region("#fields");
/// ```
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Prefix of generated form ids.
    ///
    /// Default: `"form_"`
    pub id_prefix: String,

    /// Validator factories injected into every field.
    ///
    /// Default: `Number` and `Required`
    pub validators: ValidatorRegistry,

    /// Display region the form's direct children are attached to.
    ///
    /// Default: `".form-content"`
    pub field_region: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            id_prefix: "form_".to_string(),
            validators: ValidatorRegistry::default(),
            field_region: ".form-content".to_string(),
        }
    }
}

impl FormConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the id prefix.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Sets the validator registry.
    pub fn with_validators(mut self, validators: ValidatorRegistry) -> Self {
        self.validators = validators;
        self
    }

    /// Sets the field region of the root form.
    pub fn with_field_region(mut self, region: impl Into<String>) -> Self {
        self.field_region = region.into();
        self
    }
}
