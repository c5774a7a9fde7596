//! Entity schema descriptions.
//!
//! A schema maps attribute names to their declared [`SemanticType`] plus the
//! per-attribute hints the classifier honours. Schemas are supplied by the
//! caller (or generated from entity definitions); nothing here introspects
//! types at runtime.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared value kind of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SemanticType {
    String,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    /// Enumeration with its declared constants, in declaration order.
    Enum {
        values: Vec<String>,
    },
    /// Calendar date.
    Date,
    /// Date with time of day.
    DateTime,
}

impl SemanticType {
    /// Creates an enum type from its constants.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SemanticType::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true for the integer and floating families.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SemanticType::Short
                | SemanticType::Integer
                | SemanticType::Long
                | SemanticType::Float
                | SemanticType::Double
        )
    }

    /// Returns true for date and date/time attributes.
    pub fn is_temporal(&self) -> bool {
        matches!(self, SemanticType::Date | SemanticType::DateTime)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticType::String => "string",
            SemanticType::Short => "short",
            SemanticType::Integer => "integer",
            SemanticType::Long => "long",
            SemanticType::Float => "float",
            SemanticType::Double => "double",
            SemanticType::Boolean => "boolean",
            SemanticType::Enum { .. } => "enum",
            SemanticType::Date => "date",
            SemanticType::DateTime => "date_time",
        };
        f.write_str(name)
    }
}

/// Declared type and parsing hints of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    #[serde(flatten)]
    pub semantic_type: SemanticType,

    /// Skip this attribute when a global search term is applied.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclude_from_global_search: bool,

    /// Compare this attribute by its textual form regardless of its type.
    #[serde(default, skip_serializing_if = "is_false")]
    pub force_string: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl AttributeSpec {
    /// Creates a spec with no hints set.
    pub fn new(semantic_type: SemanticType) -> Self {
        Self {
            semantic_type,
            exclude_from_global_search: false,
            force_string: false,
        }
    }

    /// Marks the attribute as excluded from global search.
    pub fn excluded_from_global_search(mut self) -> Self {
        self.exclude_from_global_search = true;
        self
    }

    /// Marks the attribute to be compared as a string.
    pub fn as_string(mut self) -> Self {
        self.force_string = true;
        self
    }

    /// The type the classifier dispatches on, after the string override.
    pub fn effective_type(&self) -> &SemanticType {
        if self.force_string {
            &SemanticType::String
        } else {
            &self.semantic_type
        }
    }
}

/// Attribute set of one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    #[serde(default)]
    attributes: BTreeMap<String, AttributeSpec>,
}

impl EntitySchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, spec: AttributeSpec) -> Self {
        self.attributes.insert(name.into(), spec);
        self
    }

    /// Adds (or replaces) an attribute in place.
    pub fn insert(&mut self, name: impl Into<String>, spec: AttributeSpec) {
        self.attributes.insert(name.into(), spec);
    }

    /// Looks up an attribute.
    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.get(name)
    }

    /// Returns true if the attribute exists.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// All attributes in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeSpec)> {
        self.attributes.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Attributes that take part in global search.
    pub fn searchable(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, spec)| !spec.exclude_from_global_search)
            .map(|(name, _)| name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if the schema has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Schemas of several entities, keyed by entity name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRegistry {
    #[serde(flatten)]
    entities: BTreeMap<String, EntitySchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the schema of an entity.
    pub fn register(&mut self, entity: impl Into<String>, schema: EntitySchema) {
        self.entities.insert(entity.into(), schema);
    }

    /// Returns the attribute set of an entity.
    pub fn attributes_of(&self, entity: &str) -> Option<&EntitySchema> {
        self.entities.get(entity)
    }

    /// Registered entity names.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}
