//! Listing parameters as received from a caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ListingError, Result};
use crate::filter::PredicateSpec;

/// Query-string prefix of per-attribute filter keys.
pub const FILTER_ATTRIBUTE_PREFIX: &str = "filter-";

/// Raw listing inputs, before any compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingParameters {
    /// Absolute offset of the first result.
    pub index: Option<i64>,
    /// One-based page number.
    pub page: Option<i64>,
    /// Page size; `0` means unbounded.
    pub limit: Option<i64>,
    /// `;`-separated sort keys.
    pub sort: Option<String>,
    /// Global search term applied to every searchable attribute.
    pub filter: Option<String>,
    /// Attribute (or `a|b` multi-attribute key) to filter string.
    pub filter_attributes: BTreeMap<String, String>,
    /// Caller-supplied predicate tree.
    pub predicate: Option<PredicateSpec>,
}

impl ListingParameters {
    /// Creates empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds parameters from an `application/x-www-form-urlencoded` string.
    ///
    /// Recognized keys are `index`, `page`, `limit`, `sort`, `filter` and
    /// every `filter-<attribute>`. Blank values are treated as absent;
    /// unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::InvalidParameter` if `index`, `page` or `limit`
    /// is not an integer, `ListingError::QueryString` if the string cannot
    /// be decoded.
    ///
    /// # Example
    ///
    /// ```
    /// use listing_query_rs::params::ListingParameters;
    ///
    /// let params = ListingParameters::from_query("page=2&sort=-age&filter-name=ann*").unwrap();
    /// assert_eq!(params.page, Some(2));
    /// assert_eq!(params.sort.as_deref(), Some("-age"));
    /// assert_eq!(params.filter_attributes["name"], "ann*");
    /// ```
    pub fn from_query(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;

        let mut params = Self::new();
        for (key, value) in pairs {
            match key.as_str() {
                "index" => params.index = parse_integer(&key, &value)?,
                "page" => params.page = parse_integer(&key, &value)?,
                "limit" => params.limit = parse_integer(&key, &value)?,
                "sort" => params.sort = non_blank(&value),
                "filter" => params.filter = non_blank(&value),
                _ => {
                    if let Some(attribute) = key.strip_prefix(FILTER_ATTRIBUTE_PREFIX) {
                        params.add_filter_attribute(attribute, &value);
                    }
                }
            }
        }
        Ok(params)
    }

    /// Adds a filter for an attribute; blank attributes or values are ignored.
    pub fn add_filter_attribute(&mut self, attribute: impl AsRef<str>, value: impl AsRef<str>) {
        let attribute = attribute.as_ref().trim();
        let value = value.as_ref().trim();
        if attribute.is_empty() || value.is_empty() {
            return;
        }
        self.filter_attributes
            .insert(attribute.to_string(), value.to_string());
    }

    /// Sets the sort string.
    pub fn with_sort(mut self, sort: impl AsRef<str>) -> Self {
        self.sort = non_blank(sort.as_ref());
        self
    }

    /// Sets the global search term.
    pub fn with_filter(mut self, filter: impl AsRef<str>) -> Self {
        self.filter = non_blank(filter.as_ref());
        self
    }

    /// Sets the caller-supplied predicate tree.
    pub fn with_predicate(mut self, predicate: PredicateSpec) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Returns true if any filter input is present.
    pub fn has_filters(&self) -> bool {
        self.filter.is_some() || !self.filter_attributes.is_empty() || self.predicate.is_some()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_integer(name: &str, value: &str) -> Result<Option<i64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ListingError::invalid_parameter(name, value))
}
