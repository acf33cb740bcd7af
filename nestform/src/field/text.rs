//! Text and number fields.

use log::warn;
use nestform_model::{Value, ValidatorKind};

use super::LeafKind;
use crate::view::{RawInput, View};

/// Single-line text. Empty input counts as no input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl LeafKind for Text {
    const TEMPLATE: &'static str = "editor-text";

    fn read(&self, name: &str, view: &dyn View) -> Option<Value> {
        read_text(name, view)
    }

    fn initial_input(&self, initial: &Value) -> Option<RawInput> {
        initial.to_input_text().map(RawInput::Text)
    }
}

/// Text that must hold a number; coerced to a float once validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Number;

impl LeafKind for Number {
    const TEMPLATE: &'static str = "editor-text";

    fn default_validators(&self) -> &'static [ValidatorKind] {
        &[ValidatorKind::Number]
    }

    fn read(&self, name: &str, view: &dyn View) -> Option<Value> {
        read_text(name, view)
    }

    fn post_process(&self, raw: Value) -> Value {
        match raw {
            Value::String(s) => match s.parse::<f64>() {
                Ok(n) => Value::Float(n),
                Err(_) => {
                    warn!("[input] cannot coerce {:?} to a number, keeping text", s);
                    Value::String(s)
                }
            },
            Value::Int(n) => Value::Float(n as f64),
            other => other,
        }
    }

    fn initial_input(&self, initial: &Value) -> Option<RawInput> {
        initial.to_input_text().map(RawInput::Text)
    }
}

fn read_text(name: &str, view: &dyn View) -> Option<Value> {
    match view.input(name)? {
        RawInput::Text(s) if s.is_empty() => None,
        RawInput::Text(s) => Some(Value::String(s)),
        other => {
            warn!("[input] '{}' expected text input, got {:?}", name, other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ErrorReport, Signal};
    use crate::field::{FieldOptions, Leaf};
    use crate::validation::ValidatorRegistry;
    use crate::view::MemoryView;

    fn text(options: FieldOptions) -> Leaf<Text> {
        Leaf::new(options, Text, &ValidatorRegistry::default()).unwrap()
    }

    fn number(options: FieldOptions) -> Leaf<Number> {
        Leaf::new(options, Number, &ValidatorRegistry::default()).unwrap()
    }

    #[test]
    fn test_text_empty_is_absent() {
        let field = text(FieldOptions::new("name"));
        let view = MemoryView::new().with_text("name", "");
        assert_eq!(field.get_value(&view), None);

        let view = MemoryView::new().with_text("name", "Ann");
        assert_eq!(field.get_value(&view), Some(Value::from("Ann")));
    }

    #[test]
    fn test_optional_absent_passes_undefined() {
        let mut field = number(FieldOptions::new("age"));
        let mut view = MemoryView::new();
        assert_eq!(field.validate(&mut view), Signal::pass("age", None));
    }

    #[test]
    fn test_required_absent_fails() {
        let mut field = number(FieldOptions::new("age").required());
        let mut view = MemoryView::new();

        let signal = field.validate(&mut view);
        assert_eq!(signal, Signal::fail("age", "Blank value not allowed here"));
        assert_eq!(view.error("age"), Some("Blank value not allowed here"));
    }

    #[test]
    fn test_required_is_prepended_once() {
        let field = number(
            FieldOptions::new("age")
                .required()
                .validator(ValidatorKind::Required),
        );
        let messages: Vec<_> = field.validators().iter().map(|v| v.message()).collect();
        assert_eq!(
            messages,
            vec!["Blank value not allowed here", "A number is expected here"]
        );
    }

    #[test]
    fn test_listed_required_makes_field_required() {
        let field = text(FieldOptions::new("name").validator(ValidatorKind::Required));
        assert!(field.required());
    }

    #[test]
    fn test_number_coerces_to_float() {
        let mut field = number(FieldOptions::new("age"));
        let mut view = MemoryView::new().with_text("age", "12");
        assert_eq!(field.validate(&mut view), Signal::pass("age", Some(Value::Float(12.0))));
        assert_eq!(field.last_value(), Some(&Value::from("12")));
    }

    #[test]
    fn test_number_rejects_text_and_displays_error() {
        let mut field = number(FieldOptions::new("age"));
        let mut view = MemoryView::new().with_text("age", "abc");

        let Signal::Fail { error, .. } = field.validate(&mut view) else {
            panic!("expected failure");
        };
        assert_eq!(error, ErrorReport::from("A number is expected here"));
        assert_eq!(view.error("age"), Some("A number is expected here"));

        // Fixing the input clears the displayed error
        view.set_text("age", "3.5");
        assert!(field.validate(&mut view).is_pass());
        assert_eq!(view.error("age"), None);
    }

    #[test]
    fn test_initial_input() {
        let field = number(FieldOptions::new("age").initial(Value::Float(12.0)));
        let mut view = MemoryView::new();
        field.mount("form", ".form-content", &mut view);
        assert_eq!(view.input("age"), Some(RawInput::Text("12".into())));
    }

    #[test]
    fn test_serialize_projection() {
        let field = text(FieldOptions::new("name").label("Name").required().help_text("Full name"));
        let data = field.serialize();
        assert_eq!(data["name"], "name");
        assert_eq!(data["label"], "Name");
        assert_eq!(data["required"], true);
        assert_eq!(data["helpText"], "Full name");
        assert_eq!(data["template"], "editor-text");
        assert_eq!(data["inline"], false);
    }
}
