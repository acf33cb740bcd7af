//! Choice field.

use log::warn;
use nestform_model::{AttributeSchema, Choice, Value};
use serde_json::json;

use super::LeafKind;
use crate::view::{RawInput, View};

/// Choices and selection mode.
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub multiple: bool,
    /// Selection that means "nothing chosen".
    pub null_value: String,
    pub choices: Vec<Choice>,
}

impl SelectOptions {
    pub fn from_attribute(attribute: &AttributeSchema) -> Self {
        Self {
            multiple: attribute.multiple,
            null_value: String::new(),
            choices: attribute.choices.clone(),
        }
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn choice(mut self, val: impl Into<String>, label: impl Into<String>) -> Self {
        self.choices.push(Choice::new(val, label));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Select {
    options: SelectOptions,
}

impl Select {
    pub fn new(options: SelectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SelectOptions {
        &self.options
    }

    fn selection(&self, mut values: Vec<String>) -> Option<Value> {
        if !self.options.multiple {
            values.truncate(1);
        }
        values.retain(|v| *v != self.options.null_value);
        if values.is_empty() {
            return None;
        }
        Some(Value::List(values.into_iter().map(Value::String).collect()))
    }
}

/// Identifier of a choice given as initial data.
fn choice_id(value: Value) -> Value {
    match value {
        Value::Record(record) => record
            .id()
            .map(|id| Value::String(id.to_string()))
            .unwrap_or_default(),
        Value::Map(mut map) => map.remove("id").unwrap_or_default(),
        other => other,
    }
}

impl LeafKind for Select {
    const TEMPLATE: &'static str = "editor-select";

    fn read(&self, name: &str, view: &dyn View) -> Option<Value> {
        match view.input(name)? {
            RawInput::Selected(values) => self.selection(values),
            RawInput::Text(value) => self.selection(vec![value]),
            RawInput::Checked(token) => {
                warn!("[input] '{}' expected a selection, got checked token {:?}", name, token);
                None
            }
        }
    }

    fn post_process(&self, raw: Value) -> Value {
        if self.options.multiple {
            return raw;
        }
        match raw {
            Value::List(items) => items.into_iter().next().unwrap_or_default(),
            other => other,
        }
    }

    fn normalize_initial(&self, initial: Option<Value>) -> Option<Value> {
        let items = match initial {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::List(items)) => items,
            Some(other) => vec![other],
        };
        Some(Value::List(items.into_iter().map(choice_id).collect()))
    }

    fn initial_input(&self, initial: &Value) -> Option<RawInput> {
        let selected: Vec<String> = initial
            .as_list()?
            .iter()
            .filter_map(Value::to_input_text)
            .collect();
        if selected.is_empty() {
            return None;
        }
        Some(RawInput::Selected(selected))
    }

    fn extend_view_data(&self, required: bool, data: &mut serde_json::Map<String, serde_json::Value>) {
        let mut choices = Vec::with_capacity(self.options.choices.len() + 1);
        if !required && !self.options.multiple {
            choices.push(Choice::new(self.options.null_value.clone(), "--"));
        }
        choices.extend(self.options.choices.iter().cloned());

        data.insert("multiple".to_string(), json!(self.options.multiple));
        data.insert("options".to_string(), json!([{ "label": "", "options": choices }]));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::event::Signal;
    use crate::field::{FieldOptions, Leaf};
    use crate::validation::ValidatorRegistry;
    use crate::view::MemoryView;
    use nestform_model::{ModelClass, Record, Schema};

    fn colors() -> SelectOptions {
        SelectOptions::default()
            .choice("r", "Red")
            .choice("g", "Green")
    }

    fn field(options: FieldOptions, select: SelectOptions) -> Leaf<Select> {
        Leaf::new(options, Select::new(select), &ValidatorRegistry::default()).unwrap()
    }

    #[test]
    fn test_single_selection_unwraps() {
        let mut field = field(FieldOptions::new("color"), colors());
        let mut view = MemoryView::new().with_selected("color", ["g"]);

        assert_eq!(field.get_value(&view), Some(Value::List(vec!["g".into()])));
        assert_eq!(field.validate(&mut view), Signal::pass("color", Some("g".into())));
    }

    #[test]
    fn test_null_token_is_absent() {
        let mut field = field(FieldOptions::new("color").required(), colors());
        let mut view = MemoryView::new().with_selected("color", [""]);

        assert_eq!(field.get_value(&view), None);
        assert!(!field.validate(&mut view).is_pass());
    }

    #[test]
    fn test_multiple_keeps_list() {
        let mut field = field(FieldOptions::new("colors"), colors().multiple());
        let mut view = MemoryView::new().with_selected("colors", ["r", "g"]);

        assert_eq!(
            field.validate(&mut view),
            Signal::pass("colors", Some(Value::List(vec!["r".into(), "g".into()])))
        );

        view.set_selected("colors", Vec::<String>::new());
        assert_eq!(field.validate(&mut view), Signal::pass("colors", None));
    }

    #[test]
    fn test_initial_data_normalized_to_ids() {
        let field_missing = field(FieldOptions::new("color"), colors());
        assert_eq!(field_missing.initial_data(), Some(&Value::List(vec![])));

        let field_scalar = field(FieldOptions::new("color").initial("r"), colors());
        assert_eq!(field_scalar.initial_data(), Some(&Value::List(vec!["r".into()])));

        let class = Arc::new(ModelClass::new("color", "Color", Schema::new()));
        let id = uuid::Uuid::new_v4();
        let record = Record::with_id(class, id);
        let field_record = field(FieldOptions::new("color").initial(record), colors());
        assert_eq!(
            field_record.initial_data(),
            Some(&Value::List(vec![Value::String(id.to_string())]))
        );
    }

    #[test]
    fn test_serialize_prepends_blank_choice() {
        let optional = field(FieldOptions::new("color"), colors()).serialize();
        assert_eq!(
            optional["options"][0]["options"],
            json!([
                {"val": "", "label": "--"},
                {"val": "r", "label": "Red"},
                {"val": "g", "label": "Green"}
            ])
        );

        let required = field(FieldOptions::new("color").required(), colors()).serialize();
        assert_eq!(required["options"][0]["options"].as_array().unwrap().len(), 2);

        let multiple = field(FieldOptions::new("color"), colors().multiple()).serialize();
        assert_eq!(multiple["options"][0]["options"].as_array().unwrap().len(), 2);
        assert_eq!(multiple["multiple"], true);
    }
}
