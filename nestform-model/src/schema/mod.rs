//! Structural schema types

mod attribute;
mod model;

pub use attribute::*;
pub use model::*;

use serde::Deserialize;
use serde::Serialize;

use crate::SchemaError;

/// Ordered set of attribute definitions.
///
/// Order is declaration order: it is the order in which a form builds and
/// validates the corresponding fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AttributeSchema>", into = "Vec<AttributeSchema>")]
pub struct Schema {
    attributes: Vec<AttributeSchema>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute (builder pattern).
    pub fn with(mut self, attribute: AttributeSchema) -> Self {
        self.push(attribute);
        self
    }

    /// Appends an attribute, replacing any previous definition with the same name.
    pub fn push(&mut self, attribute: AttributeSchema) {
        match self.attributes.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Returns the attribute with the given name.
    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Returns `true` if the schema defines `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates attribute names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Iterates attributes in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, AttributeSchema> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl FromIterator<AttributeSchema> for Schema {
    fn from_iter<I: IntoIterator<Item = AttributeSchema>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for attribute in iter {
            schema.push(attribute);
        }
        schema
    }
}

impl TryFrom<Vec<AttributeSchema>> for Schema {
    type Error = SchemaError;

    /// Keeps declaration order; a repeated name is rejected.
    fn try_from(attributes: Vec<AttributeSchema>) -> Result<Self, Self::Error> {
        for (i, attribute) in attributes.iter().enumerate() {
            if attributes[..i].iter().any(|a| a.name == attribute.name) {
                return Err(SchemaError::DuplicateAttribute {
                    name: attribute.name.clone(),
                });
            }
        }
        Ok(Self { attributes })
    }
}

impl From<Schema> for Vec<AttributeSchema> {
    fn from(schema: Schema) -> Self {
        schema.attributes
    }
}
