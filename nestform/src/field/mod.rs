//! Field tree nodes.
//!
//! [`Field`] is the closed set of field kinds. Leaves ([`TextField`],
//! [`NumberField`], [`BooleanField`], [`SelectField`]) read a value and run their
//! validators; composites ([`NestedModel`], [`ListField`]) own children and
//! aggregate their outcomes.

mod boolean;
mod leaf;
mod options;
mod select;
mod text;

pub use boolean::{Boolean, BooleanOptions};
pub use leaf::{Leaf, LeafKind};
pub use options::{FieldOptions, FieldSpec, KindSpec};
pub use select::{Select, SelectOptions};
pub use text::{Number, Text};

use nestform_model::Value;

use crate::composite::{Composite, ListField, NestedModel};
use crate::error::ConfigurationError;
use crate::event::Signal;
use crate::validation::ValidatorRegistry;
use crate::view::{FieldLabel, View};

pub type TextField = Leaf<Text>;
pub type NumberField = Leaf<Number>;
pub type BooleanField = Leaf<Boolean>;
pub type SelectField = Leaf<Select>;

/// A node of the field tree.
#[derive(Debug)]
pub enum Field {
    Text(TextField),
    Number(NumberField),
    Boolean(BooleanField),
    Select(SelectField),
    NestedModel(NestedModel),
    List(ListField),
}

impl Field {
    /// Build a field of the given kind.
    pub fn build(
        options: FieldOptions,
        kind: KindSpec,
        registry: &ValidatorRegistry,
    ) -> Result<Field, ConfigurationError> {
        Ok(match kind {
            KindSpec::Text => Field::Text(Leaf::new(options, Text, registry)?),
            KindSpec::Number => Field::Number(Leaf::new(options, Number, registry)?),
            KindSpec::Boolean(b) => Field::Boolean(Leaf::new(options, Boolean::new(b), registry)?),
            KindSpec::Select(s) => Field::Select(Leaf::new(options, Select::new(s), registry)?),
            KindSpec::NestedModel(n) => Field::NestedModel(NestedModel::new(options, n, registry)?),
            KindSpec::List(l) => Field::List(ListField::new(options, l, registry)?),
        })
    }

    /// Qualified name of the field.
    pub fn name(&self) -> &str {
        match self {
            Field::Text(f) => f.name(),
            Field::Number(f) => f.name(),
            Field::Boolean(f) => f.name(),
            Field::Select(f) => f.name(),
            Field::NestedModel(f) => f.composite().name(),
            Field::List(f) => f.composite().name(),
        }
    }

    /// Display id of the field.
    pub fn id(&self) -> &str {
        match self {
            Field::Text(f) => f.id(),
            Field::Number(f) => f.id(),
            Field::Boolean(f) => f.id(),
            Field::Select(f) => f.id(),
            Field::NestedModel(f) => f.composite().id(),
            Field::List(f) => f.composite().id(),
        }
    }

    /// The field's own label.
    pub fn label(&self) -> FieldLabel {
        match self {
            Field::Text(f) => f.label(),
            Field::Number(f) => f.label(),
            Field::Boolean(f) => f.label(),
            Field::Select(f) => f.label(),
            Field::NestedModel(f) => f.composite().label(),
            Field::List(f) => f.composite().label(),
        }
    }

    /// Validate the field and return what it publishes, in order.
    ///
    /// A leaf publishes exactly one signal; a composite publishes one signal per
    /// child outcome that changes its aggregate (see [`Composite`]).
    pub fn validate(&mut self, view: &mut dyn View) -> Vec<Signal> {
        match self {
            Field::Text(f) => vec![f.validate(view)],
            Field::Number(f) => vec![f.validate(view)],
            Field::Boolean(f) => vec![f.validate(view)],
            Field::Select(f) => vec![f.validate(view)],
            Field::NestedModel(f) => f.validate(view),
            Field::List(f) => f.validate(view),
        }
    }

    /// Validate the descendant named `name` (or this field).
    ///
    /// Returns `None` when no such field exists below this one.
    pub fn validate_field(&mut self, name: &str, view: &mut dyn View) -> Option<Vec<Signal>> {
        if self.name() == name {
            return Some(self.validate(view));
        }
        match self {
            Field::NestedModel(f) => f.validate_field(name, view),
            Field::List(f) => f.validate_field(name, view),
            _ => None,
        }
    }

    /// Clear displayed errors of this field and its descendants.
    pub fn clear_validation_errors(&mut self, view: &mut dyn View) {
        match self {
            Field::Text(f) => f.clear_validation_errors(view),
            Field::Number(f) => f.clear_validation_errors(view),
            Field::Boolean(f) => f.clear_validation_errors(view),
            Field::Select(f) => f.clear_validation_errors(view),
            Field::NestedModel(f) => f.clear_validation_errors(view),
            Field::List(f) => f.clear_validation_errors(view),
        }
    }

    /// Projection of the field's configuration for the display.
    pub fn serialize(&self) -> serde_json::Value {
        match self {
            Field::Text(f) => f.serialize(),
            Field::Number(f) => f.serialize(),
            Field::Boolean(f) => f.serialize(),
            Field::Select(f) => f.serialize(),
            Field::NestedModel(f) => f.serialize(),
            Field::List(f) => f.serialize(),
        }
    }

    /// Attach this field (and its descendants) to the display.
    pub fn mount(&self, parent_id: &str, region: &str, view: &mut dyn View) {
        match self {
            Field::Text(f) => f.mount(parent_id, region, view),
            Field::Number(f) => f.mount(parent_id, region, view),
            Field::Boolean(f) => f.mount(parent_id, region, view),
            Field::Select(f) => f.mount(parent_id, region, view),
            Field::NestedModel(f) => f.mount(parent_id, region, view),
            Field::List(f) => f.mount(parent_id, region, view),
        }
    }

    /// The raw value read by the last validation pass, for leaves.
    pub fn last_value(&self) -> Option<&Value> {
        match self {
            Field::Text(f) => f.last_value(),
            Field::Number(f) => f.last_value(),
            Field::Boolean(f) => f.last_value(),
            Field::Select(f) => f.last_value(),
            Field::NestedModel(_) | Field::List(_) => None,
        }
    }

    /// The aggregation state, for composites.
    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Field::NestedModel(f) => Some(f.composite()),
            Field::List(f) => Some(f.composite()),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&NestedModel> {
        match self {
            Field::NestedModel(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListField> {
        match self {
            Field::List(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListField> {
        match self {
            Field::List(f) => Some(f),
            _ => None,
        }
    }

    /// Find the descendant named `name` (or this field).
    pub fn find(&self, name: &str) -> Option<&Field> {
        if self.name() == name {
            return Some(self);
        }
        self.as_composite().and_then(|c| c.find(name))
    }

    /// Find the descendant named `name` (or this field), mutably.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Field> {
        if self.name() == name {
            return Some(self);
        }
        match self {
            Field::NestedModel(f) => f.composite_mut().find_mut(name),
            Field::List(f) => f.composite_mut().find_mut(name),
            _ => None,
        }
    }
}
