//! Domain-object class

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::Schema;
use crate::Record;
use crate::ValueMap;

/// A domain-object class: a named structural schema that records are built from.
///
/// Classes are shared behind `Arc` so that records, nested attributes and list
/// rows can all refer to the same definition.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use nestform_model::{AttributeSchema, FieldType, ModelClass, Schema, ValueMap};
///
/// let class = Arc::new(ModelClass::new(
///     "person",
///     "Person",
///     Schema::new().with(AttributeSchema::new("name", FieldType::Text).required()),
/// ));
///
/// let record = ModelClass::instantiate(&class, ValueMap::new());
/// assert!(record.is_new());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelClass {
    /// The logical name of the class (e.g., "person").
    pub logical_name: String,

    /// Human-readable type name (e.g., "Person").
    pub verbose_name: String,

    /// The attributes of the class.
    #[serde(default)]
    pub schema: Schema,
}

impl ModelClass {
    /// Creates a new class definition.
    pub fn new(logical_name: impl Into<String>, verbose_name: impl Into<String>, schema: Schema) -> Self {
        Self {
            logical_name: logical_name.into(),
            verbose_name: verbose_name.into(),
            schema,
        }
    }

    /// Returns the structural schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Constructs a new, unsaved record seeded with `data`.
    pub fn instantiate(class: &Arc<Self>, data: ValueMap) -> Record {
        let mut record = Record::new(Arc::clone(class));
        record.set_all(data);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldType;

    #[test]
    fn test_deserialize_nested_class() {
        let json = r#"{
            "logicalName": "order",
            "verboseName": "Order",
            "schema": [
                {"name": "ref", "type": "Text", "required": true},
                {"name": "lines", "type": "List", "model": {
                    "logicalName": "line",
                    "verboseName": "Line",
                    "schema": [{"name": "qty", "type": "Number"}]
                }}
            ]
        }"#;
        let class: ModelClass = serde_json::from_str(json).unwrap();

        let lines = class.schema.get("lines").unwrap();
        assert_eq!(lines.field_type, FieldType::List);
        let line = lines.model.as_ref().unwrap();
        assert_eq!(line.verbose_name, "Line");
        assert!(line.schema.contains("qty"));
    }

    #[test]
    fn test_instantiate_seeds_attributes() {
        let class = Arc::new(ModelClass::new("person", "Person", Schema::new()));
        let mut data = ValueMap::new();
        data.insert("name".into(), "Ann".into());

        let record = ModelClass::instantiate(&class, data);
        assert_eq!(record.get_string("name").unwrap(), Some("Ann"));
        assert!(Arc::ptr_eq(record.class(), &class));
    }
}
