//! Composite fields.
//!
//! A [`Composite`] owns an ordered set of children and folds their outcomes into
//! one aggregate value or one aggregate error set. Children never call back into
//! their parent: each child's validate call returns the signals it publishes and
//! the composite consumes them in [`on_child_pass`](Composite::on_child_pass) and
//! [`on_child_fail`](Composite::on_child_fail).
//!
//! Two invariants hold after every handled signal:
//!
//! - error keys are qualified names of current children
//! - the composite is valid exactly when no error is outstanding, whether or not
//!   every child has reported yet

mod list;
mod nested;

pub use list::{ListField, ListOptions};
pub use nested::{NestedModel, NestedOptions};

use std::collections::HashMap;

use log::{debug, warn};
use nestform_model::{Value, ValueMap};

use crate::error::ConfigurationError;
use crate::event::{ErrorMap, ErrorReport, Signal};
use crate::field::{Field, FieldOptions, FieldSpec};
use crate::validation::ValidatorRegistry;
use crate::view::{FieldLabel, View};

/// Maps the collected child values to the composite's published value.
pub type PostProcess<'a> = &'a mut dyn FnMut(&ValueMap) -> Value;

/// A child together with its local key.
#[derive(Debug)]
pub struct Child {
    pub key: String,
    pub field: Field,
}

/// Aggregation state shared by every composite kind.
#[derive(Debug)]
pub struct Composite {
    id: String,
    name: String,
    label: String,
    required: bool,
    help_text: String,
    inline: bool,
    field_region: String,
    child_prefix: String,
    children: Vec<Child>,
    /// Qualified child name -> local key.
    names: HashMap<String, String>,
    /// Local key -> last passing value.
    values: ValueMap,
    /// Qualified child name -> outstanding error.
    errors: ErrorMap,
    registry: ValidatorRegistry,
}

impl Composite {
    /// Creates an empty composite from the common field options.
    ///
    /// `inline` is the layout default of the composite kind, used when the
    /// options leave it unset.
    pub fn new(
        options: &FieldOptions,
        inline: bool,
        field_region: impl Into<String>,
        registry: &ValidatorRegistry,
    ) -> Self {
        let child_prefix = if options.name.is_empty() {
            String::new()
        } else {
            format!("{}_", options.name)
        };

        Self {
            id: options.id.clone().unwrap_or_else(|| options.name.clone()),
            name: options.name.clone(),
            label: options.label.clone().unwrap_or_else(|| options.name.clone()),
            required: options.required,
            help_text: options.help_text.clone(),
            inline: options.inline.unwrap_or(inline),
            field_region: field_region.into(),
            child_prefix,
            children: Vec::new(),
            names: HashMap::new(),
            values: ValueMap::new(),
            errors: ErrorMap::new(),
            registry: registry.clone(),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> FieldLabel {
        FieldLabel::new(&self.label, self.required)
    }

    pub fn title(&self) -> &str {
        &self.label
    }

    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    pub fn inline(&self) -> bool {
        self.inline
    }

    pub fn field_region(&self) -> &str {
        &self.field_region
    }

    pub fn child_prefix(&self) -> &str {
        &self.child_prefix
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Build a child from its specification and take ownership of it.
    ///
    /// Read-only specifications are skipped and yield `Ok(None)`. The child is
    /// named `child_prefix + key`, gets id `id + "_" + key` and falls back to
    /// its key for a label.
    pub fn add_child_field(&mut self, spec: FieldSpec) -> Result<Option<&Field>, ConfigurationError> {
        let FieldSpec { key, mut options, kind } = spec;
        if options.read_only {
            debug!("[composite] '{}' skips read-only field '{}'", self.name, key);
            return Ok(None);
        }

        if self.child(&key).is_some() {
            return Err(ConfigurationError::DuplicateField {
                name: self.name.clone(),
                field: key,
            });
        }

        options.name = format!("{}{}", self.child_prefix, key);
        options.id = Some(format!("{}_{}", self.id, key));
        if options.label.is_none() {
            options.label = Some(key.clone());
        }

        let field = Field::build(options, kind, &self.registry)?;
        self.names.insert(field.name().to_string(), key.clone());
        self.children.push(Child { key, field });
        Ok(self.children.last().map(|child| &child.field))
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// The direct child with local key `key`.
    pub fn child(&self, key: &str) -> Option<&Field> {
        self.children
            .iter()
            .find(|child| child.key == key)
            .map(|child| &child.field)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Labels of every child, in declaration order.
    pub fn labels(&self) -> Vec<FieldLabel> {
        self.children.iter().map(|child| child.field.label()).collect()
    }

    /// Find a descendant by qualified name.
    pub fn find(&self, name: &str) -> Option<&Field> {
        self.children.iter().find_map(|child| child.field.find(name))
    }

    /// Find a descendant by qualified name, mutably.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.children
            .iter_mut()
            .find_map(|child| child.field.find_mut(name))
    }

    // =========================================================================
    // Aggregate state
    // =========================================================================

    /// Last passing value of each child that reported, keyed by local key.
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Outstanding child errors, keyed by qualified name.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Forget every collected value.
    pub fn discard_values(&mut self) {
        self.values.clear();
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate every child in declaration order.
    ///
    /// Returns the signals this composite publishes, in order. The aggregate
    /// outcome comes only from the child handlers.
    pub fn validate_with(&mut self, view: &mut dyn View, post: PostProcess<'_>) -> Vec<Signal> {
        let mut published = Vec::new();
        for index in 0..self.children.len() {
            let signals = self.children[index].field.validate(view);
            published.extend(self.handle_all(signals, post));
        }
        published
    }

    /// Validate the descendant named `name`, letting its outcome bubble through
    /// this composite's handlers.
    ///
    /// Returns `None` when no child holds such a field.
    pub fn validate_field_with(
        &mut self,
        name: &str,
        view: &mut dyn View,
        post: PostProcess<'_>,
    ) -> Option<Vec<Signal>> {
        let index = self
            .children
            .iter()
            .position(|child| child.field.find(name).is_some())?;
        let signals = self.children[index].field.validate_field(name, view)?;
        Some(self.handle_all(signals, post))
    }

    fn handle_all(&mut self, signals: Vec<Signal>, post: PostProcess<'_>) -> Vec<Signal> {
        signals
            .into_iter()
            .filter_map(|signal| match signal {
                Signal::Pass { name, value } => self.on_child_pass(&name, value, &mut *post),
                Signal::Fail { name, error } => self.on_child_fail(&name, error),
            })
            .collect()
    }

    /// Handle a child's `Pass`.
    ///
    /// Publishes `Pass` with the post-processed values once no error is
    /// outstanding. Names that are not direct children are ignored.
    pub fn on_child_pass(&mut self, name: &str, value: Option<Value>, post: PostProcess<'_>) -> Option<Signal> {
        let Some(key) = self.names.get(name) else {
            warn!("[composite] '{}' ignores pass from unknown field '{}'", self.name, name);
            return None;
        };

        self.values.insert(key.clone(), value.unwrap_or_default());
        self.errors.remove(name);

        if !self.errors.is_empty() {
            debug!(
                "[composite] '{}' still has {} error(s) after '{}' passed",
                self.name,
                self.errors.len(),
                name
            );
            return None;
        }

        debug!("[composite] '{}' passed", self.name);
        Some(Signal::pass(&self.name, Some(post(&self.values))))
    }

    /// Handle a child's `Fail`. Always publishes `Fail` with every outstanding
    /// error. Names that are not direct children are ignored.
    pub fn on_child_fail(&mut self, name: &str, error: ErrorReport) -> Option<Signal> {
        if !self.names.contains_key(name) {
            warn!("[composite] '{}' ignores failure from unknown field '{}'", self.name, name);
            return None;
        }

        self.errors.insert(name.to_string(), error);
        debug!(
            "[composite] '{}' failed with {} error(s)",
            self.name,
            self.errors.len()
        );
        Some(Signal::fail(&self.name, self.errors.clone()))
    }

    /// Clear this composite's displayed error, then every child's.
    pub fn clear_validation_errors(&mut self, view: &mut dyn View) {
        view.clear_error(&self.name);
        for child in &mut self.children {
            child.field.clear_validation_errors(view);
        }
    }

    /// Attach every child to this composite's field region.
    pub fn mount_children(&self, view: &mut dyn View) {
        for child in &self.children {
            child.field.mount(&self.id, &self.field_region, view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::KindSpec;
    use crate::view::MemoryView;

    fn identity(values: &ValueMap) -> Value {
        Value::Map(values.clone())
    }

    fn person() -> Composite {
        let options = FieldOptions::new("person");
        let mut composite = Composite::new(&options, false, "", &ValidatorRegistry::default());
        composite
            .add_child_field(FieldSpec::new("name", KindSpec::Text, FieldOptions::default().required()))
            .unwrap();
        composite
            .add_child_field(FieldSpec::new("age", KindSpec::Number, FieldOptions::default()))
            .unwrap();
        composite
    }

    #[test]
    fn test_children_are_qualified() {
        let composite = person();
        let age = composite.child("age").unwrap();
        assert_eq!(age.name(), "person_age");
        assert_eq!(age.id(), "person_age");
        assert_eq!(age.label().label, "age");
        assert!(composite.find("person_name").is_some());
    }

    #[test]
    fn test_empty_name_has_no_prefix() {
        let mut composite = Composite::new(&FieldOptions::new(""), false, "", &ValidatorRegistry::default());
        composite
            .add_child_field(FieldSpec::new("age", KindSpec::Number, FieldOptions::default()))
            .unwrap();
        assert_eq!(composite.child("age").unwrap().name(), "age");
    }

    #[test]
    fn test_read_only_child_skipped() {
        let mut composite = person();
        let added = composite
            .add_child_field(FieldSpec::new("created", KindSpec::Text, FieldOptions::default().read_only()))
            .unwrap();
        assert!(added.is_none());
        assert_eq!(composite.len(), 2);
    }

    #[test]
    fn test_duplicate_child_rejected() {
        let mut composite = person();
        let err = composite
            .add_child_field(FieldSpec::new("age", KindSpec::Text, FieldOptions::default()))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateField {
                name: "person".into(),
                field: "age".into()
            }
        );
        assert_eq!(composite.len(), 2);
        assert!(matches!(composite.child("age"), Some(Field::Number(_))));
    }

    #[test]
    fn test_unknown_child_names_ignored() {
        let mut composite = person();
        let mut post = identity;

        assert_eq!(composite.on_child_pass("stranger", None, &mut post), None);
        assert_eq!(composite.on_child_fail("stranger", "nope".into()), None);
        assert!(composite.values().is_empty());
        assert!(composite.is_valid());
    }

    #[test]
    fn test_partial_failure_then_recovery() {
        let mut composite = person();
        let mut post = identity;

        let published = composite.on_child_pass("person_name", Some("Ann".into()), &mut post);
        assert!(published.unwrap().is_pass());

        let published = composite.on_child_fail("person_age", "A number is expected here".into());
        let mut expected = ErrorMap::new();
        expected.insert("person_age".into(), "A number is expected here".into());
        assert_eq!(published, Some(Signal::fail("person", expected)));

        // Still failing while age is outstanding
        assert_eq!(composite.on_child_pass("person_name", Some("Bob".into()), &mut post), None);

        let published = composite.on_child_pass("person_age", Some(Value::Float(3.0)), &mut post);
        let mut values = ValueMap::new();
        values.insert("name".into(), "Bob".into());
        values.insert("age".into(), Value::Float(3.0));
        assert_eq!(published, Some(Signal::pass("person", Some(Value::Map(values)))));
    }

    #[test]
    fn test_validate_relays_in_order() {
        let mut composite = person();
        let mut view = MemoryView::new().with_text("person_name", "Ann").with_text("person_age", "x");

        let published = composite.validate_with(&mut view, &mut identity);
        assert_eq!(published.len(), 2);
        assert!(published[0].is_pass());
        assert!(!published[1].is_pass());
        assert_eq!(composite.errors().len(), 1);
        assert_eq!(composite.values().get("name"), Some(&Value::from("Ann")));
    }

    #[test]
    fn test_absent_value_stored_as_null() {
        let mut composite = person();
        let mut view = MemoryView::new().with_text("person_name", "Ann");

        composite.validate_with(&mut view, &mut identity);
        assert_eq!(composite.values().get("age"), Some(&Value::Null));
        assert!(composite.is_valid());
    }

    #[test]
    fn test_validate_field_enters_at_descendant() {
        let mut composite = person();
        let mut view = MemoryView::new().with_text("person_age", "12");

        let published = composite
            .validate_field_with("person_age", &mut view, &mut identity)
            .unwrap();
        assert_eq!(published.len(), 1);
        assert!(published[0].is_pass());

        assert!(composite.validate_field_with("missing", &mut view, &mut identity).is_none());
    }
}
