//! Listing query compiler.
//!
//! Turns plain-string listing inputs (pagination, sort, per-attribute filters
//! and a global search term) into one typed, backend-agnostic filter tree plus
//! an ordered sort spec and a resolved page window.
//!
//! # Quick Start
//!
//! ```
//! use listing_query_rs::prelude::*;
//! use serde_json::json;
//!
//! let schema = EntitySchema::new()
//!     .with_attribute("name", AttributeSpec::new(SemanticType::String))
//!     .with_attribute("age", AttributeSpec::new(SemanticType::Integer));
//! let config = ListingConfig::default();
//!
//! let params = ListingParameters::from_query("filter-age=20-40&sort=-age").unwrap();
//! let compiled = ListingQuery::new(&schema, &config).compile(&params).unwrap();
//!
//! let records = vec![
//!     json!({ "name": "Anna", "age": 31 }),
//!     json!({ "name": "Bob", "age": 52 }),
//!     json!({ "name": "Eva", "age": 38 }),
//! ];
//! let result = Listing::execute(&records, &compiled);
//! assert_eq!(result.metadata.count, 2);
//! assert_eq!(result.results[0]["name"], "Eva");
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod listing;
pub mod page;
pub mod params;
pub mod prelude;
pub mod query;
pub mod schema;
pub mod sort;

pub use error::{ListingError, Result};
