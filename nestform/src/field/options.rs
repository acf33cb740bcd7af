//! Typed field configuration.

use nestform_model::{AttributeSchema, FieldType, Value, ValidatorKind};

use super::{BooleanOptions, SelectOptions};
use crate::composite::{ListOptions, NestedOptions};

/// Options shared by every field kind.
///
/// # Example
///
/// ```
/// use nestform::field::FieldOptions;
/// use nestform::model::Value;
///
/// let options = FieldOptions::new("age")
///     .label("Age")
///     .required()
///     .initial(Value::Int(12));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// Display id. Composites assign `parent_id + "_" + key` to their children.
    pub id: Option<String>,
    /// Qualified name. Composites assign `prefix + key` to their children.
    pub name: String,
    /// Value the control starts with.
    pub initial_data: Option<Value>,
    /// Display label; composites fall back to the child's key.
    pub label: Option<String>,
    /// Template override.
    pub template: Option<String>,
    pub required: bool,
    pub help_text: String,
    /// Inline layout flag; unset means the kind's default.
    pub inline: Option<bool>,
    /// Read-only fields are never instantiated as editable children.
    pub read_only: bool,
    /// Validators applied after the kind's own.
    pub validators: Vec<ValidatorKind>,
}

impl FieldOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial_data = Some(value.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = Some(inline);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn validator(mut self, kind: ValidatorKind) -> Self {
        self.validators.push(kind);
        self
    }
}

/// Kind-specific part of a field's configuration.
#[derive(Debug, Clone)]
pub enum KindSpec {
    Text,
    Number,
    Boolean(BooleanOptions),
    Select(SelectOptions),
    NestedModel(NestedOptions),
    List(ListOptions),
}

/// A child specification: the child's local key and its configuration.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: String,
    pub options: FieldOptions,
    pub kind: KindSpec,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, kind: KindSpec, options: FieldOptions) -> Self {
        Self {
            key: key.into(),
            options,
            kind,
        }
    }

    /// Map a schema attribute to a child specification.
    ///
    /// `inline` is the parent's inline flag; it forces inline layout on the child.
    pub fn from_attribute(attribute: &AttributeSchema, initial: Option<Value>, inline: bool) -> Self {
        let options = FieldOptions {
            id: None,
            name: attribute.name.clone(),
            initial_data: initial,
            label: attribute.title.clone(),
            template: None,
            required: attribute.required,
            help_text: attribute.help_text.clone(),
            inline: Some(attribute.inline.unwrap_or(false) || inline),
            read_only: !attribute.editable,
            validators: attribute.validators.clone(),
        };

        let kind = match attribute.field_type {
            FieldType::Text => KindSpec::Text,
            FieldType::Number => KindSpec::Number,
            FieldType::Boolean => KindSpec::Boolean(BooleanOptions::from_attribute(attribute)),
            FieldType::Select => KindSpec::Select(SelectOptions::from_attribute(attribute)),
            FieldType::NestedModel => KindSpec::NestedModel(NestedOptions::from_attribute(attribute)),
            FieldType::List => KindSpec::List(ListOptions::from_attribute(attribute)),
        };

        Self::new(attribute.name.clone(), kind, options)
    }
}
