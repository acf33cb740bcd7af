//! Schema-bound composite.

use std::sync::Arc;

use log::debug;
use nestform_model::{AttributeSchema, ModelClass, Record, Schema, Value, ValueMap};
use serde_json::json;

use super::Composite;
use crate::error::ConfigurationError;
use crate::event::Signal;
use crate::field::{FieldOptions, FieldSpec};
use crate::validation::ValidatorRegistry;
use crate::view::{FieldLabel, Mount, View};

const TEMPLATE: &str = "subform";

/// Where a nested model takes its schema from, besides a record given as
/// initial data.
#[derive(Debug, Clone, Default)]
pub struct NestedOptions {
    /// Class instantiated with the initial data.
    pub model: Option<Arc<ModelClass>>,
    /// Raw schema, used when there is neither a record nor a class.
    pub schema: Option<Schema>,
    /// Subset of schema attributes to edit, in order. All when unset.
    pub fields: Option<Vec<String>>,
    /// Display region children are attached to.
    pub field_region: String,
}

impl NestedOptions {
    pub fn from_attribute(attribute: &AttributeSchema) -> Self {
        Self {
            model: attribute.model.clone(),
            fields: attribute.fields.clone(),
            ..Self::default()
        }
    }

    pub fn model(mut self, class: Arc<ModelClass>) -> Self {
        self.model = Some(class);
        self
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn field_region(mut self, region: impl Into<String>) -> Self {
        self.field_region = region.into();
        self
    }
}

/// A composite whose children are derived from a structural schema.
///
/// When bound to a record instance, the aggregate value is that record with the
/// collected values applied onto it.
#[derive(Debug)]
pub struct NestedModel {
    composite: Composite,
    schema: Schema,
    instance: Option<Record>,
    fields: Vec<String>,
    initial: ValueMap,
    template: String,
}

impl NestedModel {
    /// Build a nested model and all its children.
    ///
    /// The schema comes from, in priority order: a record given as initial
    /// data, the configured class (instantiated with the initial data), or the
    /// raw schema.
    pub fn new(
        mut options: FieldOptions,
        nested: NestedOptions,
        registry: &ValidatorRegistry,
    ) -> Result<Self, ConfigurationError> {
        let NestedOptions {
            model,
            schema,
            fields,
            field_region,
        } = nested;

        let (instance, schema, initial) = match options.initial_data.take() {
            Some(Value::Record(record)) => {
                let schema = record.schema().clone();
                let initial = record.attributes().clone();
                (Some(*record), schema, initial)
            }
            data => {
                let initial = match data {
                    None | Some(Value::Null) => ValueMap::new(),
                    Some(Value::Map(map)) => map,
                    Some(other) => {
                        return Err(ConfigurationError::InvalidInitialData {
                            name: options.name,
                            expected: "a record or a map",
                            actual: other.type_name(),
                        });
                    }
                };
                if let Some(class) = model {
                    let record = ModelClass::instantiate(&class, initial.clone());
                    (Some(record), class.schema().clone(), initial)
                } else if let Some(schema) = schema {
                    (None, schema, initial)
                } else {
                    return Err(ConfigurationError::MissingSchema { name: options.name });
                }
            }
        };

        let fields = match fields {
            Some(fields) => {
                if let Some(unknown) = fields.iter().find(|f| !schema.contains(f)) {
                    return Err(ConfigurationError::UnknownField {
                        name: options.name,
                        field: unknown.clone(),
                    });
                }
                fields
            }
            None => schema.keys().map(str::to_string).collect(),
        };

        let template = options.template.take().unwrap_or_else(|| TEMPLATE.to_string());
        let composite = Composite::new(&options, false, field_region, registry);

        let mut nested = Self {
            composite,
            schema,
            instance,
            fields,
            initial,
            template,
        };
        for spec in nested.get_fields() {
            nested.composite.add_child_field(spec)?;
        }

        debug!(
            "[nested] built '{}' with {} field(s)",
            nested.composite.name(),
            nested.composite.len()
        );
        Ok(nested)
    }

    /// Child specifications for the selected schema attributes.
    ///
    /// Each child starts from the seeded value of its attribute and is forced
    /// inline when this model is.
    pub fn get_fields(&self) -> Vec<FieldSpec> {
        self.fields
            .iter()
            .filter_map(|name| self.schema.get(name))
            .map(|attribute| {
                let initial = self
                    .initial
                    .get(&attribute.name)
                    .filter(|v| !v.is_null())
                    .cloned();
                FieldSpec::from_attribute(attribute, initial, self.composite.inline())
            })
            .collect()
    }

    pub fn composite(&self) -> &Composite {
        &self.composite
    }

    pub fn composite_mut(&mut self) -> &mut Composite {
        &mut self.composite
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The record this model writes its values into, if bound to one.
    pub fn instance(&self) -> Option<&Record> {
        self.instance.as_ref()
    }

    /// Names of the edited attributes, in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Labels of every child, in order.
    pub fn labels(&self) -> Vec<FieldLabel> {
        self.composite.labels()
    }

    pub fn validate(&mut self, view: &mut dyn View) -> Vec<Signal> {
        let Self {
            composite, instance, ..
        } = self;
        composite.validate_with(view, &mut |values| bind(instance, values))
    }

    pub fn validate_field(&mut self, name: &str, view: &mut dyn View) -> Option<Vec<Signal>> {
        let Self {
            composite, instance, ..
        } = self;
        composite.validate_field_with(name, view, &mut |values| bind(instance, values))
    }

    /// The aggregate value of the values collected so far.
    pub fn post_process_data(&mut self) -> Value {
        let Self {
            composite, instance, ..
        } = self;
        bind(instance, composite.values())
    }

    pub fn clear_validation_errors(&mut self, view: &mut dyn View) {
        self.composite.clear_validation_errors(view);
    }

    pub fn serialize(&self) -> serde_json::Value {
        json!({
            "title": self.composite.title(),
            "helpText": self.composite.help_text(),
            "inline": self.composite.inline(),
        })
    }

    /// Attach this model, then its children into its field region.
    pub fn mount(&self, parent_id: &str, region: &str, view: &mut dyn View) {
        view.attach(
            parent_id,
            Mount {
                id: self.composite.id().to_string(),
                name: self.composite.name().to_string(),
                template: self.template.clone(),
                region: region.to_string(),
                data: self.serialize(),
                initial: None,
            },
        );
        self.composite.mount_children(view);
    }
}

/// Apply `values` onto the bound record and return it, or return the raw map.
fn bind(instance: &mut Option<Record>, values: &ValueMap) -> Value {
    match instance {
        Some(record) => {
            record.set_all(values.clone());
            Value::Record(Box::new(record.clone()))
        }
        None => Value::Map(values.clone()),
    }
}
