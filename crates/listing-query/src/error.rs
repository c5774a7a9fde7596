//! Error types for listing compilation.
//!
//! Filters never fail; only sorting, parameter binding and configuration
//! loading surface errors to the caller.

use strsim::levenshtein;
use thiserror::Error;

use crate::config::ConfigError;

/// Maximum edit distance for "did you mean" suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// A specialized Result type for listing operations.
pub type Result<T> = std::result::Result<T, ListingError>;

/// Errors that can occur while compiling or executing a listing.
#[derive(Debug, Error)]
pub enum ListingError {
    /// A sort key names an attribute the entity does not have.
    #[error("{}", format_unknown_attribute(attribute, suggestion.as_deref()))]
    UnknownSortAttribute {
        /// The attribute as given.
        attribute: String,
        /// A similarly named attribute, if any.
        suggestion: Option<String>,
    },

    /// A parameter value has the wrong shape (e.g. a non-numeric `limit`).
    #[error("invalid value '{value}' for parameter '{name}'")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// The rejected raw value.
        value: String,
    },

    /// A stats operation name is not one of the known aggregates.
    #[error("unknown stats operation '{0}' (expected count, min, max, avg, sum or all)")]
    UnknownStatsOperation(String),

    /// The query string could not be decoded.
    #[error("malformed query string: {0}")]
    QueryString(#[from] serde_urlencoded::de::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ListingError {
    /// Creates an unknown sort attribute error with a suggestion drawn from
    /// `candidates`.
    pub fn unknown_sort_attribute<'a>(
        attribute: impl Into<String>,
        candidates: impl Iterator<Item = &'a str>,
    ) -> Self {
        let attribute = attribute.into();
        let suggestion = find_similar_name(&attribute, candidates);
        ListingError::UnknownSortAttribute {
            attribute,
            suggestion,
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, value: impl Into<String>) -> Self {
        ListingError::InvalidParameter {
            name: name.into(),
            value: value.into(),
        }
    }
}

fn format_unknown_attribute(attribute: &str, suggestion: Option<&str>) -> String {
    let base = format!("cannot sort by unknown attribute '{attribute}'.");
    match suggestion {
        Some(s) => format!("{base} Did you mean '{s}'?"),
        None => base,
    }
}

/// Finds the closest candidate by case-insensitive Levenshtein distance.
///
/// Returns `None` if nothing is within [`MAX_SUGGESTION_DISTANCE`] or the
/// best match is the query itself.
pub fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    if best_distance <= MAX_SUGGESTION_DISTANCE && best_match != query {
        Some(best_match.to_string())
    } else {
        None
    }
}
