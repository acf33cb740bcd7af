//! Attribute schema types

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::ModelClass;

/// Definition of one attribute of a [`ModelClass`].
///
/// This is the per-field entry of a structural schema: what kind of field
/// edits the attribute, whether it is required, how it is labelled, and the
/// kind-specific settings (choices, boolean tokens, nested class).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSchema {
    /// The attribute name (e.g., "age").
    pub name: String,

    /// The kind of field that edits this attribute.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether a value must be provided.
    #[serde(default)]
    pub required: bool,

    /// Display title; the attribute name is used when absent.
    #[serde(default)]
    pub title: Option<String>,

    /// Read-only attributes are never turned into editable fields.
    #[serde(default = "default_editable")]
    pub editable: bool,

    /// Help text shown next to the field.
    #[serde(default)]
    pub help_text: String,

    /// Inline layout flag.
    #[serde(default)]
    pub inline: Option<bool>,

    /// Extra validators applied after the field kind's own.
    #[serde(default)]
    pub validators: Vec<ValidatorKind>,

    /// For Select attributes, whether several choices may be selected.
    #[serde(default)]
    pub multiple: bool,

    /// For Select attributes, the available choices.
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// For Boolean attributes, the token of the "yes" control.
    #[serde(default)]
    pub value_yes: Option<String>,

    /// For Boolean attributes, the token of the "no" control.
    #[serde(default)]
    pub value_no: Option<String>,

    /// For Boolean attributes, the label of the "yes" control.
    #[serde(default)]
    pub label_yes: Option<String>,

    /// For Boolean attributes, the label of the "no" control.
    #[serde(default)]
    pub label_no: Option<String>,

    /// For NestedModel and List attributes, the class of the nested records.
    #[serde(default)]
    pub model: Option<Arc<ModelClass>>,

    /// For NestedModel attributes, the subset of nested attributes to edit.
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

fn default_editable() -> bool {
    true
}

impl AttributeSchema {
    /// Creates an editable, optional attribute of the given type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            title: None,
            editable: true,
            help_text: String::new(),
            inline: None,
            validators: Vec::new(),
            multiple: false,
            choices: Vec::new(),
            value_yes: None,
            value_no: None,
            label_yes: None,
            label_no: None,
            model: None,
            fields: None,
        }
    }

    /// Marks the attribute as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the display title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Marks the attribute as read-only.
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Sets the help text.
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets the inline layout flag.
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = Some(inline);
        self
    }

    /// Adds an extra validator.
    pub fn validator(mut self, kind: ValidatorKind) -> Self {
        self.validators.push(kind);
        self
    }

    /// Allows multiple selected choices.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Adds a choice.
    pub fn choice(mut self, val: impl Into<String>, label: impl Into<String>) -> Self {
        self.choices.push(Choice::new(val, label));
        self
    }

    /// Overrides the boolean control tokens.
    pub fn tokens(mut self, yes: impl Into<String>, no: impl Into<String>) -> Self {
        self.value_yes = Some(yes.into());
        self.value_no = Some(no.into());
        self
    }

    /// Sets the nested class.
    pub fn model(mut self, class: Arc<ModelClass>) -> Self {
        self.model = Some(class);
        self
    }

    /// Restricts a nested model to a subset of its attributes.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the display label: the title, or the attribute name.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Field kind enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Number typed as text, coerced to a float.
    Number,
    /// Yes/no exclusive choice.
    Boolean,
    /// Single or multiple selection among choices.
    Select,
    /// Nested record edited as a sub-form.
    NestedModel,
    /// Growable list of nested records.
    List,
}

/// Identifier of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidatorKind {
    /// Value must be numeric or a signed decimal string.
    Number,
    /// Value must be present.
    Required,
}

/// One selectable choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The identifier submitted when selected.
    pub val: String,
    /// The display label.
    pub label: String,
}

impl Choice {
    /// Creates a new choice.
    pub fn new(val: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            val: val.into(),
            label: label.into(),
        }
    }
}
