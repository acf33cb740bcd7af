//! Display collaborator interface.
//!
//! The engine never renders anything. It reads user input and reports display
//! changes through a [`View`], keyed by field names and ids.

mod memory;

pub use memory::MemoryView;

use serde::{Deserialize, Serialize};

/// Raw user input for one named control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    /// Text typed into an input control.
    Text(String),
    /// Values selected in a select control.
    Selected(Vec<String>),
    /// Token of the checked control of an exclusive group.
    #[serde(skip_deserializing)]
    Checked(String),
}

/// A field's label as shown in a header or next to its control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLabel {
    pub label: String,
    pub required: bool,
}

impl FieldLabel {
    pub fn new(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            required,
        }
    }
}

/// Everything a display needs to build a field's visual representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mount {
    /// Display id of the field.
    pub id: String,
    /// Qualified name of the field.
    pub name: String,
    /// Template the field renders with.
    pub template: String,
    /// Region of the parent's representation the field goes into.
    pub region: String,
    /// Serialized field configuration.
    pub data: serde_json::Value,
    /// Input the control starts with, from the field's initial data.
    pub initial: Option<RawInput>,
}

/// The display/rendering collaborator.
///
/// Only [`input`](View::input) is required; the display hooks default to
/// doing nothing so that headless callers can validate without a display.
pub trait View {
    /// Current user input for the control named `name`.
    fn input(&self, name: &str) -> Option<RawInput>;

    /// Mark the field as erroneous and render `message`.
    fn show_error(&mut self, _name: &str, _message: &str) {}

    /// Remove any error display from the field.
    fn clear_error(&mut self, _name: &str) {}

    /// Insert a child's representation into its parent's representation.
    fn attach(&mut self, _parent_id: &str, _mount: Mount) {}

    /// Append a new row's representation to a list.
    fn append_row(&mut self, _list_id: &str, _row_id: &str) {}

    /// Refresh a list's header row.
    fn render_headers(&mut self, _list_id: &str, _headers: &[FieldLabel]) {}

    /// Enable or disable a form's submit control.
    fn set_submit_enabled(&mut self, _form_id: &str, _enabled: bool) {}
}
