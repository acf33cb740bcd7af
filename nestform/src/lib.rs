//! Hierarchical form validation and aggregation
//!
//! A form is a tree of fields. Leaves read raw input from a [`View`](view::View),
//! run their validators and report one pass/fail [`Signal`](event::Signal) per
//! validation pass. Composites fold their children's signals into one aggregate
//! value or one aggregate error set, and report upward in turn. The root
//! [`Form`](form::Form) adds the submit/reset lifecycle and fans its events out
//! to subscribers.
//!
//! Nothing is rendered here: display changes are reported through the `View`
//! trait, and [`MemoryView`](view::MemoryView) keeps them in memory.

pub mod composite;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod form;
pub mod validation;
pub mod view;

pub use nestform_model as model;

pub mod prelude {
    pub use crate::composite::{Composite, ListField, ListOptions, NestedModel, NestedOptions};
    pub use crate::config::FormConfig;
    pub use crate::error::{ConfigurationError, ValidationError};
    pub use crate::event::{ErrorMap, ErrorReport, FormEvent, Signal, SubscriptionId};
    pub use crate::field::{Field, FieldOptions, FieldSpec, KindSpec};
    pub use crate::form::{Form, Submission};
    pub use crate::validation::{Validator, ValidatorRegistry};
    pub use crate::view::{MemoryView, RawInput, View};

    pub use nestform_model::{AttributeSchema, FieldType, ModelClass, Record, Schema, Value, ValueMap};
}
