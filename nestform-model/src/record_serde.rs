//! Custom serialization for Record.
//!
//! A record serializes as a flat map of its attributes, preceded by `"id"` when
//! the record has been persisted. Null attributes are not written; nested
//! records serialize the same way.

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }

        for (key, value) in &self.attributes {
            match value {
                Value::Null => {
                    // Absent attributes carry no information for the consumer
                }
                _ => map.serialize_entry(key, value)?,
            }
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::*;
    use crate::AttributeSchema;
    use crate::FieldType;
    use crate::ModelClass;
    use crate::Schema;

    fn class() -> Arc<ModelClass> {
        Arc::new(ModelClass::new(
            "person",
            "Person",
            Schema::new().with(AttributeSchema::new("name", FieldType::Text)),
        ))
    }

    #[test]
    fn test_serialize_simple_fields() {
        let record = Record::new(class()).set("name", "Ann").set("age", 12.0);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"name\":\"Ann\""));
        assert!(json.contains("\"age\":12.0"));
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn test_serialize_skips_null() {
        let record = Record::new(class()).set("name", Value::Null);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_serialize_with_id() {
        let id = Uuid::parse_str("12345678-1234-1234-1234-123456789012").unwrap();
        let record = Record::with_id(class(), id).set("name", "Ann");

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with("{\"id\":\"12345678-1234-1234-1234-123456789012\""));
    }

    #[test]
    fn test_serialize_nested_record_value() {
        let inner = Record::new(class()).set("name", "Bob");
        let outer = Record::new(class()).set("friend", inner);

        let json = serde_json::to_value(&outer).unwrap();
        assert_eq!(json, serde_json::json!({"friend": {"name": "Bob"}}));
    }
}
