//! Domain-object instance

use std::sync::Arc;

use uuid::Uuid;

use super::ModelClass;
use super::Schema;
use super::Value;
use super::ValueMap;
use crate::error::RecordError;

/// An instance of a [`ModelClass`].
///
/// A record knows its class (and therefore its schema and display name), an
/// optional persisted identifier, and its current attribute values. A record
/// without an identifier has never been saved.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use nestform_model::{AttributeSchema, FieldType, ModelClass, Record, Schema};
///
/// let class = Arc::new(ModelClass::new(
///     "person",
///     "Person",
///     Schema::new().with(AttributeSchema::new("name", FieldType::Text)),
/// ));
///
/// let record = Record::new(class).set("name", "Ann");
/// assert!(record.is_new());
/// assert_eq!(record.get_string("name").unwrap(), Some("Ann"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub(crate) class: Arc<ModelClass>,
    pub(crate) id: Option<Uuid>,
    pub(crate) attributes: ValueMap,
}

impl Record {
    /// Creates a new, unsaved record with no attributes.
    pub fn new(class: Arc<ModelClass>) -> Self {
        Self {
            class,
            id: None,
            attributes: ValueMap::new(),
        }
    }

    /// Creates a persisted record with the given identifier.
    pub fn with_id(class: Arc<ModelClass>, id: Uuid) -> Self {
        Self {
            class,
            id: Some(id),
            attributes: ValueMap::new(),
        }
    }

    // =========================================================================
    // Class accessors
    // =========================================================================

    /// Returns the class this record is an instance of.
    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    /// Returns the structural schema of the record's class.
    pub fn schema(&self) -> &Schema {
        &self.class.schema
    }

    /// Returns the human-readable type name.
    pub fn verbose_name(&self) -> &str {
        &self.class.verbose_name
    }

    /// Returns the persisted identifier, if any.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Sets the persisted identifier.
    pub fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    /// Returns `true` if the record has never been persisted.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    // =========================================================================
    // Attribute access
    // =========================================================================

    /// Returns a reference to the attribute value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    /// Returns all attributes.
    pub fn attributes(&self) -> &ValueMap {
        &self.attributes
    }

    /// Sets an attribute value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(field.into(), value.into());
        self
    }

    /// Inserts an attribute value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(field.into(), value.into());
    }

    /// Merges `values` into the attributes, overwriting existing keys.
    pub fn set_all(&mut self, values: ValueMap) {
        self.attributes.extend(values);
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if the attribute is missing or has the wrong type.
    // Return Ok(None) only if the attribute exists and is Value::Null.
    // =========================================================================

    /// Gets a string attribute value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, RecordError> {
        match self.attributes.get(field) {
            None => Err(RecordError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(RecordError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Gets a boolean attribute value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, RecordError> {
        match self.attributes.get(field) {
            None => Err(RecordError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(RecordError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets a numeric attribute value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, RecordError> {
        match self.attributes.get(field) {
            None => Err(RecordError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(RecordError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a nested record attribute value.
    pub fn get_record(&self, field: &str) -> Result<Option<&Record>, RecordError> {
        match self.attributes.get(field) {
            None => Err(RecordError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r.as_ref())),
            Some(other) => Err(RecordError::type_mismatch(field, "record", other.type_name())),
        }
    }

    /// Gets a list attribute value.
    pub fn get_list(&self, field: &str) -> Result<Option<&[Value]>, RecordError> {
        match self.attributes.get(field) {
            None => Err(RecordError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::List(items)) => Ok(Some(items)),
            Some(other) => Err(RecordError::type_mismatch(field, "list", other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeSchema, FieldType};

    fn person() -> Arc<ModelClass> {
        Arc::new(ModelClass::new(
            "person",
            "Person",
            Schema::new()
                .with(AttributeSchema::new("name", FieldType::Text))
                .with(AttributeSchema::new("age", FieldType::Number)),
        ))
    }

    #[test]
    fn test_typed_getters() {
        let record = Record::new(person())
            .set("name", "Ann")
            .set("age", 12i64)
            .set("nickname", Value::Null);

        assert_eq!(record.get_string("name").unwrap(), Some("Ann"));
        assert_eq!(record.get_float("age").unwrap(), Some(12.0));
        assert_eq!(record.get_string("nickname").unwrap(), None);
        assert_eq!(record.get_string("missing"), Err(RecordError::missing("missing")));
        assert_eq!(
            record.get_bool("name"),
            Err(RecordError::type_mismatch("name", "bool", "string"))
        );
    }

    #[test]
    fn test_set_all_merges() {
        let mut record = Record::new(person()).set("name", "Ann").set("age", 3i64);
        let mut values = ValueMap::new();
        values.insert("age".into(), Value::Float(4.0));
        record.set_all(values);

        assert_eq!(record.get_string("name").unwrap(), Some("Ann"));
        assert_eq!(record.get_float("age").unwrap(), Some(4.0));
    }

    #[test]
    fn test_is_new() {
        let mut record = Record::new(person());
        assert!(record.is_new());
        record.set_id(Uuid::new_v4());
        assert!(!record.is_new());
        assert_eq!(record.verbose_name(), "Person");
    }
}
