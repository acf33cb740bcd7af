//! In-memory display.

use std::collections::HashMap;

use serde::Deserialize;

use super::{FieldLabel, Mount, RawInput, View};

/// A [`View`] that keeps inputs and display state in maps.
///
/// Used by headless drivers and tests: inputs are set programmatically and the
/// display calls made by the engine can be inspected afterwards.
///
/// # Example
///
/// ```
/// use nestform::view::{MemoryView, RawInput, View};
///
/// let view = MemoryView::new().with_text("name", "Ann").with_checked("member", "yes");
/// assert_eq!(view.input("name"), Some(RawInput::Text("Ann".into())));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    inputs: HashMap<String, RawInput>,
    errors: HashMap<String, String>,
    mounts: Vec<(String, Mount)>,
    rows: HashMap<String, Vec<String>>,
    headers: HashMap<String, Vec<FieldLabel>>,
    submit: HashMap<String, bool>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a view from a JSON object mapping control names to inputs.
    ///
    /// Strings become text input and arrays of strings become selections.
    pub fn from_json(inputs: serde_json::Value) -> Result<Self, serde_json::Error> {
        let inputs = HashMap::<String, RawInput>::deserialize(inputs)?;
        Ok(Self {
            inputs,
            ..Self::default()
        })
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    pub fn with_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_text(name, text);
        self
    }

    pub fn with_checked(mut self, name: impl Into<String>, token: impl Into<String>) -> Self {
        self.set_checked(name, token);
        self
    }

    pub fn with_selected<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_selected(name, values);
        self
    }

    pub fn set_text(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.inputs.insert(name.into(), RawInput::Text(text.into()));
    }

    pub fn set_checked(&mut self, name: impl Into<String>, token: impl Into<String>) {
        self.inputs.insert(name.into(), RawInput::Checked(token.into()));
    }

    pub fn set_selected<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.inputs.insert(name.into(), RawInput::Selected(values));
    }

    /// Forget the input of a control, as if it was never touched.
    pub fn clear_input(&mut self, name: &str) -> Option<RawInput> {
        self.inputs.remove(name)
    }

    // =========================================================================
    // Display state
    // =========================================================================

    /// The error message currently displayed on a field.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Every displayed error, keyed by field name.
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// The mount record of a field, by qualified name.
    pub fn mounted(&self, name: &str) -> Option<&Mount> {
        self.mounts.iter().map(|(_, m)| m).find(|m| m.name == name)
    }

    /// Every attach call, as `(parent_id, mount)`, in call order.
    pub fn mounts(&self) -> &[(String, Mount)] {
        &self.mounts
    }

    /// Row ids appended to a list, in order.
    pub fn rows(&self, list_id: &str) -> &[String] {
        self.rows.get(list_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// The last headers rendered for a list.
    pub fn headers(&self, list_id: &str) -> Option<&[FieldLabel]> {
        self.headers.get(list_id).map(Vec::as_slice)
    }

    /// Whether a form's submit control is enabled, if it was ever set.
    pub fn submit_enabled(&self, form_id: &str) -> Option<bool> {
        self.submit.get(form_id).copied()
    }
}

impl View for MemoryView {
    fn input(&self, name: &str) -> Option<RawInput> {
        self.inputs.get(name).cloned()
    }

    fn show_error(&mut self, name: &str, message: &str) {
        self.errors.insert(name.to_string(), message.to_string());
    }

    fn clear_error(&mut self, name: &str) {
        self.errors.remove(name);
    }

    fn attach(&mut self, parent_id: &str, mount: Mount) {
        // Controls start from the field's initial data unless already filled in
        if let Some(initial) = &mount.initial {
            self.inputs
                .entry(mount.name.clone())
                .or_insert_with(|| initial.clone());
        }
        self.mounts.push((parent_id.to_string(), mount));
    }

    fn append_row(&mut self, list_id: &str, row_id: &str) {
        self.rows
            .entry(list_id.to_string())
            .or_default()
            .push(row_id.to_string());
    }

    fn render_headers(&mut self, list_id: &str, headers: &[FieldLabel]) {
        self.headers.insert(list_id.to_string(), headers.to_vec());
    }

    fn set_submit_enabled(&mut self, form_id: &str, enabled: bool) {
        self.submit.insert(form_id.to_string(), enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let view = MemoryView::from_json(serde_json::json!({
            "name": "Ann",
            "tags": ["a", "b"]
        }))
        .unwrap();

        assert_eq!(view.input("name"), Some(RawInput::Text("Ann".into())));
        assert_eq!(
            view.input("tags"),
            Some(RawInput::Selected(vec!["a".into(), "b".into()]))
        );
        assert_eq!(view.input("missing"), None);
    }

    #[test]
    fn test_attach_does_not_overwrite_input() {
        let mut view = MemoryView::new().with_text("name", "typed");
        let mount = |name: &str| Mount {
            id: format!("f_{name}"),
            name: name.to_string(),
            template: "editor-text".into(),
            region: String::new(),
            data: serde_json::Value::Null,
            initial: Some(RawInput::Text("initial".into())),
        };
        view.attach("f", mount("name"));
        view.attach("f", mount("other"));

        assert_eq!(view.input("name"), Some(RawInput::Text("typed".into())));
        assert_eq!(view.input("other"), Some(RawInput::Text("initial".into())));
        assert_eq!(view.mounts().len(), 2);
        assert_eq!(view.mounted("other").unwrap().id, "f_other");
    }

    #[test]
    fn test_errors() {
        let mut view = MemoryView::new();
        view.show_error("age", "A number is expected here");
        assert_eq!(view.error("age"), Some("A number is expected here"));
        view.clear_error("age");
        assert!(view.errors().is_empty());
    }
}
