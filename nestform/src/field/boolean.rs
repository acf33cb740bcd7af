//! Yes/no field backed by two exclusive controls.

use log::warn;
use nestform_model::{AttributeSchema, Value};
use serde::Serialize;

use super::LeafKind;
use crate::view::{RawInput, View};

/// Tokens and labels of the two controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BooleanOptions {
    pub value_yes: String,
    pub value_no: String,
    pub label_yes: String,
    pub label_no: String,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self {
            value_yes: "yes".to_string(),
            value_no: "no".to_string(),
            label_yes: "Yes".to_string(),
            label_no: "No".to_string(),
        }
    }
}

impl BooleanOptions {
    /// Defaults overridden by whatever the attribute configures.
    pub fn from_attribute(attribute: &AttributeSchema) -> Self {
        let defaults = Self::default();
        Self {
            value_yes: attribute.value_yes.clone().unwrap_or(defaults.value_yes),
            value_no: attribute.value_no.clone().unwrap_or(defaults.value_no),
            label_yes: attribute.label_yes.clone().unwrap_or(defaults.label_yes),
            label_no: attribute.label_no.clone().unwrap_or(defaults.label_no),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Boolean {
    options: BooleanOptions,
}

impl Boolean {
    pub fn new(options: BooleanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BooleanOptions {
        &self.options
    }

    fn parse_token(&self, token: &str) -> Option<Value> {
        if token == self.options.value_yes {
            Some(Value::Bool(true))
        } else if token == self.options.value_no {
            Some(Value::Bool(false))
        } else {
            None
        }
    }
}

impl LeafKind for Boolean {
    const TEMPLATE: &'static str = "editor-boolean";

    /// `true`, `false`, or absent when neither control is checked.
    fn read(&self, name: &str, view: &dyn View) -> Option<Value> {
        match view.input(name)? {
            RawInput::Checked(token) | RawInput::Text(token) => self.parse_token(&token),
            RawInput::Selected(values) => {
                warn!("[input] '{}' expected a checked token, got selection {:?}", name, values);
                None
            }
        }
    }

    fn initial_input(&self, initial: &Value) -> Option<RawInput> {
        let token = match initial {
            Value::Bool(true) => &self.options.value_yes,
            Value::Bool(false) => &self.options.value_no,
            Value::String(s) if self.parse_token(s).is_some() => s,
            _ => return None,
        };
        Some(RawInput::Checked(token.clone()))
    }

    fn extend_view_data(&self, _required: bool, data: &mut serde_json::Map<String, serde_json::Value>) {
        if let Ok(serde_json::Value::Object(options)) = serde_json::to_value(&self.options) {
            data.extend(options);
        }
    }
}
