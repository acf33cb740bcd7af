//! Growable list of nested records.

use std::sync::Arc;

use log::debug;
use nestform_model::{AttributeSchema, ModelClass, Value, ValueMap};
use serde_json::json;

use super::{Composite, NestedModel, NestedOptions};
use crate::error::ConfigurationError;
use crate::event::Signal;
use crate::field::{Field, FieldOptions, FieldSpec, KindSpec};
use crate::validation::ValidatorRegistry;
use crate::view::{FieldLabel, Mount, View};

const TEMPLATE: &str = "editor-list";

#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Class every row is built from.
    pub model: Option<Arc<ModelClass>>,
    /// Display region rows are appended to.
    pub field_region: String,
    /// Display region of the header row.
    pub head_region: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            model: None,
            field_region: ".items".to_string(),
            head_region: "thead".to_string(),
        }
    }
}

impl ListOptions {
    pub fn from_attribute(attribute: &AttributeSchema) -> Self {
        Self {
            model: attribute.model.clone(),
            ..Self::default()
        }
    }

    pub fn model(mut self, class: Arc<ModelClass>) -> Self {
        self.model = Some(class);
        self
    }
}

/// A composite of homogeneous [`NestedModel`] rows.
///
/// Rows are keyed by a strictly increasing counter that is never reused. Only
/// append is supported. Headers are the labels of the first row ever created
/// and are never recomputed.
#[derive(Debug)]
pub struct ListField {
    composite: Composite,
    model: Arc<ModelClass>,
    counter: usize,
    items: Vec<usize>,
    headers: Vec<FieldLabel>,
    head_region: String,
    template: String,
}

impl ListField {
    /// Build a list, with one row per entry of the initial data.
    ///
    /// Initial entries may be records or raw attribute maps.
    pub fn new(
        mut options: FieldOptions,
        list: ListOptions,
        registry: &ValidatorRegistry,
    ) -> Result<Self, ConfigurationError> {
        let Some(model) = list.model else {
            return Err(ConfigurationError::MissingListModel { name: options.name });
        };

        let rows = match options.initial_data.take() {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::List(rows)) => rows,
            Some(other) => {
                return Err(ConfigurationError::InvalidInitialData {
                    name: options.name,
                    expected: "a list",
                    actual: other.type_name(),
                });
            }
        };

        let template = options.template.take().unwrap_or_else(|| TEMPLATE.to_string());
        let composite = Composite::new(&options, true, list.field_region, registry);

        let mut field = Self {
            composite,
            model,
            counter: 0,
            items: Vec::new(),
            headers: Vec::new(),
            head_region: list.head_region,
            template,
        };

        for row in rows {
            field.push_row(Some(row))?;
        }
        field.headers = field.row(0).map(NestedModel::labels).unwrap_or_default();

        debug!(
            "[list] built '{}' with {} row(s)",
            field.composite.name(),
            field.items.len()
        );
        Ok(field)
    }

    fn push_row(&mut self, initial: Option<Value>) -> Result<usize, ConfigurationError> {
        let index = self.counter;
        self.counter += 1;

        let mut options = FieldOptions::default().inline(self.composite.inline());
        options.initial_data = initial;
        let kind = KindSpec::NestedModel(NestedOptions::default().model(Arc::clone(&self.model)));

        self.composite
            .add_child_field(FieldSpec::new(index.to_string(), kind, options))?;
        self.items.push(index);
        Ok(index)
    }

    /// Append one empty row and attach it to the display.
    ///
    /// Returns the new row's index. The first row ever created also sets the
    /// headers.
    pub fn add_item(&mut self, view: &mut dyn View) -> Result<usize, ConfigurationError> {
        let index = self.push_row(None)?;
        let key = index.to_string();
        let Some(row) = self.composite.child(&key).and_then(Field::as_nested) else {
            return Ok(index);
        };

        if index == 0 {
            self.headers = row.labels();
            view.render_headers(self.composite.id(), &self.headers);
        }

        row.mount(self.composite.id(), self.composite.field_region(), view);
        view.append_row(self.composite.id(), row.composite().id());
        debug!("[list] '{}' appended row {}", self.composite.name(), index);
        Ok(index)
    }

    /// The row with the given index.
    pub fn row(&self, index: usize) -> Option<&NestedModel> {
        self.composite
            .child(&index.to_string())
            .and_then(|field| field.as_nested())
    }

    /// Row indexes, in creation order.
    pub fn rows(&self) -> &[usize] {
        &self.items
    }

    pub fn headers(&self) -> &[FieldLabel] {
        &self.headers
    }

    pub fn head_region(&self) -> &str {
        &self.head_region
    }

    pub fn model(&self) -> &Arc<ModelClass> {
        &self.model
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn composite(&self) -> &Composite {
        &self.composite
    }

    pub fn composite_mut(&mut self) -> &mut Composite {
        &mut self.composite
    }

    pub fn validate(&mut self, view: &mut dyn View) -> Vec<Signal> {
        let Self {
            composite, items, ..
        } = self;
        composite.validate_with(view, &mut |values| collect_rows(items, values))
    }

    pub fn validate_field(&mut self, name: &str, view: &mut dyn View) -> Option<Vec<Signal>> {
        let Self {
            composite, items, ..
        } = self;
        composite.validate_field_with(name, view, &mut |values| collect_rows(items, values))
    }

    /// The aggregate value of the values collected so far.
    pub fn post_process_data(&self) -> Value {
        collect_rows(&self.items, self.composite.values())
    }

    pub fn clear_validation_errors(&mut self, view: &mut dyn View) {
        self.composite.clear_validation_errors(view);
    }

    pub fn serialize(&self) -> serde_json::Value {
        json!({
            "id": self.composite.id(),
            "name": self.composite.name(),
            "label": self.composite.title(),
            "template": self.template,
            "required": self.composite.label().required,
            "helpText": self.composite.help_text(),
            "inline": self.composite.inline(),
            "headers": self.headers,
        })
    }

    /// Attach the list, its headers and every row.
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
        view.render_headers(self.composite.id(), &self.headers);
        for child in self.composite.children() {
            child
                .field
                .mount(self.composite.id(), self.composite.field_region(), view);
            view.append_row(self.composite.id(), child.field.id());
        }
    }
}

/// Row values ordered by row index. Rows that never reported are left out.
fn collect_rows(items: &[usize], values: &ValueMap) -> Value {
    Value::List(
        items
            .iter()
            .filter_map(|index| values.get(&index.to_string()).cloned())
            .collect(),
    )
}
