//! Leaf field protocol.

use std::fmt::Debug;
use std::sync::Arc;

use log::debug;
use nestform_model::{Value, ValidatorKind};
use serde_json::json;

use super::FieldOptions;
use crate::error::{ConfigurationError, ValidationError};
use crate::event::Signal;
use crate::validation::{Validator, ValidatorRegistry, run_validators};
use crate::view::{FieldLabel, Mount, RawInput, View};

/// Behaviour that differs between leaf field kinds.
pub trait LeafKind: Debug {
    /// Template used when none is configured.
    const TEMPLATE: &'static str;

    /// Validators the kind always carries, run after `Required`.
    fn default_validators(&self) -> &'static [ValidatorKind] {
        &[]
    }

    /// Read the raw value of control `name`. `None` means no input provided.
    fn read(&self, name: &str, view: &dyn View) -> Option<Value>;

    /// Coerce a validated value.
    fn post_process(&self, raw: Value) -> Value {
        raw
    }

    /// Normalize configured initial data.
    fn normalize_initial(&self, initial: Option<Value>) -> Option<Value> {
        initial
    }

    /// Express initial data as the input a control starts with.
    fn initial_input(&self, initial: &Value) -> Option<RawInput>;

    /// Add kind-specific entries to the serialized configuration.
    fn extend_view_data(&self, _required: bool, _data: &mut serde_json::Map<String, serde_json::Value>) {}
}

/// A field that validates a single control's input.
#[derive(Debug)]
pub struct Leaf<K> {
    id: String,
    name: String,
    label: String,
    template: String,
    required: bool,
    help_text: String,
    inline: bool,
    initial_data: Option<Value>,
    validators: Vec<Arc<dyn Validator>>,
    last_value: Option<Value>,
    kind: K,
}

impl<K: LeafKind> Leaf<K> {
    /// Build a leaf field.
    ///
    /// A required field gets a `Required` validator in front of the kind's own
    /// validators and the configured extra ones. Listing `Required` among the
    /// extra validators makes the field required.
    pub fn new(options: FieldOptions, kind: K, registry: &ValidatorRegistry) -> Result<Self, ConfigurationError> {
        let FieldOptions {
            id,
            name,
            initial_data,
            label,
            template,
            required,
            help_text,
            inline,
            read_only: _,
            validators: extra,
        } = options;

        let required = required || extra.contains(&ValidatorKind::Required);
        let validators = required
            .then_some(ValidatorKind::Required)
            .into_iter()
            .chain(kind.default_validators().iter().copied())
            .chain(extra.into_iter().filter(|k| *k != ValidatorKind::Required))
            .map(|k| {
                registry
                    .create(k)
                    .ok_or(ConfigurationError::MissingValidator { kind: k })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let initial_data = kind.normalize_initial(initial_data);

        Ok(Self {
            id: id.unwrap_or_else(|| name.clone()),
            label: label.unwrap_or_else(|| name.clone()),
            template: template.unwrap_or_else(|| K::TEMPLATE.to_string()),
            name,
            required,
            help_text,
            inline: inline.unwrap_or(false),
            initial_data,
            validators,
            last_value: None,
            kind,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn initial_data(&self) -> Option<&Value> {
        self.initial_data.as_ref()
    }

    /// The validator chain, in the order it runs.
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    /// The raw value read by the last validation pass.
    pub fn last_value(&self) -> Option<&Value> {
        self.last_value.as_ref()
    }

    pub fn label(&self) -> FieldLabel {
        FieldLabel::new(&self.label, self.required)
    }

    /// Read the control's current input.
    pub fn get_value(&self, view: &dyn View) -> Option<Value> {
        self.kind.read(&self.name, view)
    }

    /// Coerce a validated value.
    pub fn post_process_data(&self, raw: Option<Value>) -> Option<Value> {
        raw.map(|v| self.kind.post_process(v))
    }

    /// Read, check and coerce the control's input.
    ///
    /// Publishes exactly one signal. A failing rule never escapes: its message
    /// is displayed on the field and carried by the `Fail` signal.
    pub fn validate(&mut self, view: &mut dyn View) -> Signal {
        let value = self.get_value(view);
        self.last_value = value.clone();
        self.clear_validation_errors(view);

        match run_validators(value, &self.validators, self.required) {
            Ok(value) => {
                let value = self.post_process_data(value);
                debug!("[validate] '{}' passed with {:?}", self.name, value);
                Signal::pass(&self.name, value)
            }
            Err(err) => {
                debug!("[validate] '{}' failed: {}", self.name, err);
                self.handle_validation_error(&err, view);
                Signal::fail(&self.name, err)
            }
        }
    }

    pub fn clear_validation_errors(&self, view: &mut dyn View) {
        view.clear_error(&self.name);
    }

    fn handle_validation_error(&self, err: &ValidationError, view: &mut dyn View) {
        view.show_error(&self.name, &err.message);
    }

    /// Projection of the field's configuration for the display.
    pub fn serialize(&self) -> serde_json::Value {
        let mut data = json!({
            "id": self.id,
            "name": self.name,
            "initialData": self.initial_data,
            "label": self.label,
            "template": self.template,
            "required": self.required,
            "helpText": self.help_text,
            "inline": self.inline,
        });
        if let serde_json::Value::Object(map) = &mut data {
            self.kind.extend_view_data(self.required, map);
        }
        data
    }

    pub fn mount(&self, parent_id: &str, region: &str, view: &mut dyn View) {
        let initial = self
            .initial_data
            .as_ref()
            .and_then(|v| self.kind.initial_input(v));
        view.attach(
            parent_id,
            Mount {
                id: self.id.clone(),
                name: self.name.clone(),
                template: self.template.clone(),
                region: region.to_string(),
                data: self.serialize(),
                initial,
            },
        );
    }
}
