//! Sort specification parsing.

use serde::Serialize;

use crate::config::ListingConfig;
use crate::error::{ListingError, Result};
use crate::schema::EntitySchema;

/// Separator between sort keys.
pub const SORT_SEPARATOR: char = ';';

/// One attribute to order by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub attribute: String,
    pub descending: bool,
}

impl SortKey {
    /// Creates an ascending key.
    pub fn asc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            descending: false,
        }
    }

    /// Creates a descending key.
    pub fn desc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            descending: true,
        }
    }
}

/// Ordered list of sort keys; the first key is the primary order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Creates a spec from keys.
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// Parses a `;`-separated sort string and validates every attribute.
    ///
    /// A key prefixed with the descending marker sorts descending; no marker
    /// or the ascending marker sorts ascending. Empty keys are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::UnknownSortAttribute` for the first key naming
    /// an attribute that is not in `schema`.
    ///
    /// # Example
    ///
    /// ```
    /// use listing_query_rs::config::ListingConfig;
    /// use listing_query_rs::schema::{AttributeSpec, EntitySchema, SemanticType};
    /// use listing_query_rs::sort::{SortKey, SortSpec};
    ///
    /// let schema = EntitySchema::new()
    ///     .with_attribute("created", AttributeSpec::new(SemanticType::DateTime))
    ///     .with_attribute("name", AttributeSpec::new(SemanticType::String));
    /// let config = ListingConfig::default();
    ///
    /// let spec = SortSpec::parse("-created;name", &schema, &config).unwrap();
    /// assert_eq!(spec.keys(), &[SortKey::desc("created"), SortKey::asc("name")]);
    /// ```
    pub fn parse(raw: &str, schema: &EntitySchema, config: &ListingConfig) -> Result<Self> {
        let markers = &config.sort;
        let mut keys = Vec::new();

        for token in raw.split(SORT_SEPARATOR).map(str::trim) {
            if token.is_empty() {
                continue;
            }

            let descending = token.starts_with(markers.desc.as_str());
            let mut attribute = token;
            if let Some(rest) = attribute.strip_prefix(markers.desc.as_str()) {
                attribute = rest;
            }
            if let Some(rest) = attribute.strip_prefix(markers.asc.as_str()) {
                attribute = rest;
            }
            let attribute = attribute.trim();
            if attribute.is_empty() {
                continue;
            }

            if !schema.contains(attribute) {
                return Err(ListingError::unknown_sort_attribute(
                    attribute,
                    schema.names(),
                ));
            }
            keys.push(SortKey {
                attribute: attribute.to_string(),
                descending,
            });
        }

        Ok(Self { keys })
    }

    /// The keys in priority order.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns true if no order was requested.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over the keys in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &SortKey> {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeSpec, SemanticType};

    fn schema() -> EntitySchema {
        EntitySchema::new()
            .with_attribute("created", AttributeSpec::new(SemanticType::DateTime))
            .with_attribute("name", AttributeSpec::new(SemanticType::String))
            .with_attribute("age", AttributeSpec::new(SemanticType::Integer))
    }

    #[test]
    fn test_parse_directions() {
        let config = ListingConfig::default();
        let spec = SortSpec::parse("-created;name;+age", &schema(), &config).unwrap();
        assert_eq!(
            spec.keys(),
            &[
                SortKey::desc("created"),
                SortKey::asc("name"),
                SortKey::asc("age"),
            ]
        );
    }

    #[test]
    fn test_parse_trims_and_skips_empty() {
        let config = ListingConfig::default();
        let spec = SortSpec::parse(" ; - name ;; ", &schema(), &config).unwrap();
        assert_eq!(spec.keys(), &[SortKey::desc("name")]);

        let spec = SortSpec::parse("", &schema(), &config).unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_parse_unknown_attribute_is_error() {
        let config = ListingConfig::default();
        let err = SortSpec::parse("name;-nmae", &schema(), &config).unwrap_err();
        match err {
            ListingError::UnknownSortAttribute {
                attribute,
                suggestion,
            } => {
                assert_eq!(attribute, "nmae");
                assert_eq!(suggestion.as_deref(), Some("name"));
            }
            other => panic!("expected UnknownSortAttribute, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_custom_markers() {
        let mut config = ListingConfig::default();
        config.sort.desc = "v".to_string();
        config.sort.asc = "^".to_string();
        let spec = SortSpec::parse("^age;vname", &schema(), &config).unwrap();
        assert_eq!(spec.keys(), &[SortKey::asc("age"), SortKey::desc("name")]);
    }
}
