//! Tests for the root form lifecycle.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use nestform::prelude::*;
use serde_json::json;

fn person_schema() -> Schema {
    Schema::new()
        .with(AttributeSchema::new("name", FieldType::Text).required())
        .with(AttributeSchema::new("age", FieldType::Number))
}

fn person_form() -> Form {
    Form::for_schema(person_schema(), &FormConfig::default()).unwrap()
}

fn errors_json(submission: &Submission) -> serde_json::Value {
    match submission {
        Submission::Invalid(errors) => serde_json::to_value(errors).unwrap(),
        Submission::Valid(value) => panic!("expected invalid submission, got {value:?}"),
    }
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submit_three_times() {
    let mut form = person_form();

    let mut view = MemoryView::new().with_text("name", "").with_text("age", "12");
    let submission = form.submit(&mut view);
    assert_eq!(
        errors_json(&submission),
        json!({"name": "Blank value not allowed here"})
    );

    view.set_text("name", "Ann");
    view.set_text("age", "abc");
    let submission = form.submit(&mut view);
    assert_eq!(
        errors_json(&submission),
        json!({"age": "A number is expected here"})
    );

    view.set_text("age", "12");
    let submission = form.submit(&mut view);
    let Submission::Valid(value) = submission else {
        panic!("expected valid submission");
    };
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({"name": "Ann", "age": 12.0})
    );
}

#[test]
fn test_optional_absent_collected_as_null() {
    let mut form = person_form();
    let mut view = MemoryView::new().with_text("name", "Ann");

    let submission = form.submit(&mut view);
    assert!(submission.is_valid());
    assert_eq!(form.values().get("age"), Some(&Value::Null));
}

#[test]
fn test_repeated_validation_is_idempotent() {
    let mut form = person_form();
    let mut view = MemoryView::new().with_text("name", "Ann").with_text("age", "x");

    let first = form.validate(&mut view);
    let errors = form.errors().clone();
    let second = form.validate(&mut view);

    assert_eq!(first, second);
    assert_eq!(form.errors(), &errors);
    assert_eq!(view.error("age"), Some("A number is expected here"));
}

#[test]
fn test_submit_returns_record_when_bound() {
    let class = Arc::new(ModelClass::new("person", "Person", person_schema()));
    let record = Record::new(Arc::clone(&class)).set("name", "Ann");
    let mut form = Form::for_record(record, &FormConfig::default()).unwrap();

    let mut view = MemoryView::new();
    form.mount(&mut view);
    view.set_text("age", "40");

    let Submission::Valid(Value::Record(record)) = form.submit(&mut view) else {
        panic!("expected a record");
    };
    assert_eq!(record.get_string("name").unwrap(), Some("Ann"));
    assert_eq!(record.get_float("age").unwrap(), Some(40.0));
}

// ============================================================================
// Submit control
// ============================================================================

#[test]
fn test_submit_enabled_follows_errors() {
    let mut form = person_form();
    let mut view = MemoryView::new().with_text("age", "x");

    form.validate(&mut view);
    assert!(!form.submit_enabled());
    assert_eq!(view.submit_enabled(form.id()), Some(false));

    view.set_text("name", "Ann");
    view.set_text("age", "3");
    form.validate(&mut view);
    assert!(form.submit_enabled());
    assert_eq!(view.submit_enabled(form.id()), Some(true));
}

#[test]
fn test_validate_single_field() {
    let mut form = person_form();
    let mut view = MemoryView::new().with_text("age", "x");

    assert!(form.validate_field("age", &mut view));
    assert!(!form.submit_enabled());
    assert_eq!(
        serde_json::to_value(form.errors()).unwrap(),
        json!({"age": "A number is expected here"})
    );

    // Name was never validated, so the form counts as valid once age is fixed
    view.set_text("age", "7");
    assert!(form.validate_field("age", &mut view));
    assert!(form.is_valid());
    assert!(form.submit_enabled());

    assert!(!form.validate_field("missing", &mut view));
}

#[test]
fn test_reset() {
    let mut form = person_form();
    let mut view = MemoryView::new().with_text("name", "Ann").with_text("age", "x");
    form.validate(&mut view);
    assert!(!form.values().is_empty());

    form.reset(&mut view);
    assert!(form.values().is_empty());
    assert!(form.submit_enabled());
    assert!(view.errors().is_empty());
    // Outstanding errors wait for the next validation pass
    assert_eq!(form.errors().len(), 1);
}

// ============================================================================
// Subscribers
// ============================================================================

#[test]
fn test_subscribers_receive_events() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut form = person_form();
    let seen = Rc::clone(&events);
    let id = form.subscribe(move |event| seen.borrow_mut().push(event.clone()));

    let mut view = MemoryView::new().with_text("name", "Ann").with_text("age", "5");
    form.submit(&mut view);

    {
        let events = events.borrow();
        assert!(matches!(events.first(), Some(FormEvent::Valid(Signal::Pass { .. }))));
        assert!(matches!(events.last(), Some(FormEvent::SubmitValid(_))));
    }

    assert!(form.unsubscribe(id));
    let count = events.borrow().len();
    form.submit(&mut view);
    assert_eq!(events.borrow().len(), count);
}

#[test]
fn test_submit_invalid_event() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut form = person_form();
    let seen = Rc::clone(&events);
    form.subscribe(move |event| seen.borrow_mut().push(event.clone()));

    let mut view = MemoryView::new();
    form.submit(&mut view);

    let events = events.borrow();
    let Some(FormEvent::SubmitInvalid(errors)) = events.last() else {
        panic!("expected submit invalid");
    };
    assert!(errors.contains_key("name"));
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn test_mount_prefills_initial_data() {
    let class = Arc::new(ModelClass::new("person", "Person", person_schema()));
    let record = Record::new(class).set("name", "Ann").set("age", 30.0);
    let form = Form::for_record(record, &FormConfig::default()).unwrap();

    let mut view = MemoryView::new();
    form.mount(&mut view);

    assert_eq!(view.input("name"), Some(RawInput::Text("Ann".into())));
    assert_eq!(view.input("age"), Some(RawInput::Text("30".into())));

    let age = view.mounted("age").unwrap();
    assert_eq!(age.region, ".form-content");
    assert_eq!(age.id, format!("{}_age", form.id()));
    assert_eq!(view.mounted("").unwrap().template, "form");
    assert_eq!(view.submit_enabled(form.id()), Some(true));
}

#[test]
fn test_read_only_attributes_are_not_fields() {
    let schema = person_schema().with(AttributeSchema::new("created", FieldType::Text).read_only());
    let form = Form::for_schema(schema, &FormConfig::default()).unwrap();

    assert!(form.field("created").is_none());
    assert_eq!(form.model().composite().len(), 2);
}
