//! Root form.

use std::sync::Arc;

use log::{debug, info, warn};
use nestform_model::{ModelClass, Record, Schema, Value, ValueMap};
use uuid::Uuid;

use crate::composite::{Composite, NestedModel, NestedOptions};
use crate::config::FormConfig;
use crate::error::ConfigurationError;
use crate::event::{Channel, ErrorMap, FormEvent, Signal, SubscriptionId};
use crate::field::{Field, FieldOptions};
use crate::view::View;

const TEMPLATE: &str = "form";

/// Outcome of [`Form::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// No error was outstanding; carries the aggregated value.
    Valid(Value),
    /// Outstanding errors, keyed by qualified name.
    Invalid(ErrorMap),
}

impl Submission {
    pub fn is_valid(&self) -> bool {
        matches!(self, Submission::Valid(_))
    }
}

/// A nested model with no parent, a submit/reset lifecycle and subscribers.
///
/// # Example
///
/// ```
/// use nestform::config::FormConfig;
/// use nestform::form::Form;
/// use nestform::model::{AttributeSchema, FieldType, Schema, Value};
/// use nestform::view::MemoryView;
///
/// let schema = Schema::new()
///     .with(AttributeSchema::new("name", FieldType::Text).required())
///     .with(AttributeSchema::new("age", FieldType::Number));
/// let mut form = Form::for_schema(schema, &FormConfig::default()).unwrap();
///
/// let mut view = MemoryView::new().with_text("name", "Ann").with_text("age", "12");
/// let submission = form.submit(&mut view);
/// assert!(submission.is_valid());
/// assert_eq!(form.values().get("age"), Some(&Value::Float(12.0)));
/// ```
#[derive(Debug)]
pub struct Form {
    model: NestedModel,
    submit_enabled: bool,
    events: Channel<FormEvent>,
}

impl Form {
    /// Build a form.
    ///
    /// Without explicit `id`/`label` options, identity comes from a record
    /// given as initial data: a persisted record yields `id_prefix + id` and
    /// `"<VerboseName> <id>"`, a new one a fresh id and `"New <verbose name>"`.
    /// Anything else gets a fresh id and an empty label.
    pub fn new(
        mut options: FieldOptions,
        nested: NestedOptions,
        config: &FormConfig,
    ) -> Result<Self, ConfigurationError> {
        let (id, label) = match &options.initial_data {
            Some(Value::Record(record)) => identity(record, &config.id_prefix),
            _ => (fresh_id(&config.id_prefix), String::new()),
        };
        options.id = options.id.or(Some(id));
        options.label = options.label.or(Some(label));
        options.template = options.template.or_else(|| Some(TEMPLATE.to_string()));

        let nested = NestedOptions {
            field_region: config.field_region.clone(),
            ..nested
        };
        let model = NestedModel::new(options, nested, &config.validators)?;

        info!(
            "[form] built '{}' with {} field(s)",
            model.composite().id(),
            model.composite().len()
        );
        Ok(Self {
            model,
            submit_enabled: true,
            events: Channel::new(),
        })
    }

    /// A form over a raw schema.
    pub fn for_schema(schema: Schema, config: &FormConfig) -> Result<Self, ConfigurationError> {
        Self::new(FieldOptions::default(), NestedOptions::default().schema(schema), config)
    }

    /// A form editing an existing record.
    pub fn for_record(record: Record, config: &FormConfig) -> Result<Self, ConfigurationError> {
        Self::new(FieldOptions::default().initial(record), NestedOptions::default(), config)
    }

    /// A form creating a new instance of `class` seeded with `data`.
    pub fn for_model(
        class: Arc<ModelClass>,
        data: ValueMap,
        config: &FormConfig,
    ) -> Result<Self, ConfigurationError> {
        Self::new(
            FieldOptions::default().initial(data),
            NestedOptions::default().model(class),
            config,
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        self.model.composite().id()
    }

    pub fn label(&self) -> &str {
        self.model.composite().title()
    }

    pub fn model(&self) -> &NestedModel {
        &self.model
    }

    fn composite(&self) -> &Composite {
        self.model.composite()
    }

    /// Values collected so far, keyed by local key.
    pub fn values(&self) -> &ValueMap {
        self.composite().values()
    }

    /// Outstanding errors, keyed by qualified name.
    pub fn errors(&self) -> &ErrorMap {
        self.composite().errors()
    }

    pub fn is_valid(&self) -> bool {
        self.composite().is_valid()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// A descendant field by qualified name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.composite().find(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.model.composite_mut().find_mut(name)
    }

    // =========================================================================
    // Subscribers
    // =========================================================================

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&FormEvent) + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach the form and every descendant to the display.
    pub fn mount(&self, view: &mut dyn View) {
        self.model.mount("", "", view);
        view.set_submit_enabled(self.id(), self.submit_enabled);
    }

    /// Validate every field.
    ///
    /// Returns the form's own signals; each is also published as
    /// [`FormEvent::Valid`].
    pub fn validate(&mut self, view: &mut dyn View) -> Vec<Signal> {
        let signals = self.model.validate(view);
        self.settle(signals, view)
    }

    /// Validate a single field by qualified name, as when a control loses
    /// focus.
    ///
    /// Returns `false` when the form has no such field.
    pub fn validate_field(&mut self, name: &str, view: &mut dyn View) -> bool {
        let Some(signals) = self.model.validate_field(name, view) else {
            warn!("[form] '{}' has no field '{}'", self.id(), name);
            return false;
        };
        self.settle(signals, view);
        true
    }

    fn settle(&mut self, signals: Vec<Signal>, view: &mut dyn View) -> Vec<Signal> {
        self.set_submit_enabled(self.is_valid(), view);
        for signal in &signals {
            self.events.publish(&FormEvent::Valid(signal.clone()));
        }
        signals
    }

    fn set_submit_enabled(&mut self, enabled: bool, view: &mut dyn View) {
        if self.submit_enabled != enabled {
            debug!("[form] '{}' submit enabled: {}", self.id(), enabled);
        }
        self.submit_enabled = enabled;
        view.set_submit_enabled(self.model.composite().id(), enabled);
    }

    /// Validate everything, then publish and return the outcome.
    pub fn submit(&mut self, view: &mut dyn View) -> Submission {
        self.validate(view);

        let submission = if self.is_valid() {
            Submission::Valid(self.model.post_process_data())
        } else {
            Submission::Invalid(self.errors().clone())
        };
        info!(
            "[form] '{}' submitted, valid: {}",
            self.id(),
            submission.is_valid()
        );

        let event = match &submission {
            Submission::Valid(value) => FormEvent::SubmitValid(value.clone()),
            Submission::Invalid(errors) => FormEvent::SubmitInvalid(errors.clone()),
        };
        self.events.publish(&event);
        submission
    }

    /// Clear displayed errors, re-enable submit and discard collected values.
    ///
    /// Outstanding errors are kept; the next validation pass settles them.
    pub fn reset(&mut self, view: &mut dyn View) {
        self.model.clear_validation_errors(view);
        self.set_submit_enabled(true, view);
        self.model.composite_mut().discard_values();
    }
}

fn fresh_id(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

fn identity(record: &Record, prefix: &str) -> (String, String) {
    match record.id() {
        Some(id) => (
            format!("{prefix}{id}"),
            format!("{} {}", record.verbose_name(), id),
        ),
        None => (
            fresh_id(prefix),
            format!("New {}", record.verbose_name().to_lowercase()),
        ),
    }
}
