//! Filter compilation for listing queries.
//!
//! Raw filter strings go through three stages:
//!
//! 1. [`ExpressionParser`] splits a string into a structural [`PredicateNode`]
//!    tree (AND before OR, NOT prefixes, multi-attribute keys, IN rewrite).
//! 2. [`TreeBuilder`] checks attributes against the schema and classifies each
//!    literal with the [`Classifier`], producing a typed [`Condition`].
//! 3. A consumer translates the condition for its backend; the
//!    [`ConditionEvaluator`] does so for in-memory records.
//!
//! # Supported Syntax
//!
//! ## Operators (defaults)
//! - `&` / `AND` - both terms must match (binds tighter than OR)
//! - `|` / `OR` - either term matches
//! - `!` / `NOT` - negates a single term
//! - `~` / `LIKE` - textual pattern match on numbers
//! - `<` / `LT`, `>` / `GT` - strict inequality on numbers and dates
//! - `-` / `TO` - inclusive range on numbers and dates
//! - `NULL` - the value is missing
//!
//! ## Strings
//! - `"exact"` - case-sensitive equality
//! - `text` - case-insensitive containment
//! - `te*t`, `t?xt` - case-insensitive wildcard match
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use listing_query_rs::config::ListingConfig;
//! use listing_query_rs::filter::TreeBuilder;
//! use listing_query_rs::schema::{AttributeSpec, EntitySchema, SemanticType};
//!
//! let schema = EntitySchema::new()
//!     .with_attribute("name", AttributeSpec::new(SemanticType::String))
//!     .with_attribute("age", AttributeSpec::new(SemanticType::Integer));
//! let config = ListingConfig::default();
//!
//! let filters = BTreeMap::from([
//!     ("name".to_string(), "ann*".to_string()),
//!     ("age".to_string(), "20-30".to_string()),
//!     ("bogus".to_string(), "5".to_string()),
//! ]);
//! let condition = TreeBuilder::new(&schema, &config)
//!     .build_from_map(&filters)
//!     .unwrap();
//! assert_eq!(condition.to_string(), "(age BETWEEN 20 AND 30 AND name LIKE 'ann%')");
//! ```

mod ast;
mod builder;
mod classify;
mod evaluator;
mod literal;
mod parser;

pub use ast::{Group, Leaf, MatchKind, Mode, PredicateNode, PredicateSpec};
pub use builder::{Condition, TreeBuilder};
pub use classify::{
    has_wildcard, is_quoted, parse_date_period, parse_double, parse_float, parse_integer,
    parse_long, parse_number, parse_short, remove_quotes, Classifier,
};
pub use evaluator::{literal_matches, ConditionEvaluator, Record, Value};
pub use literal::{Bound, LikePattern, NumberValue, TypedLiteral};
pub use parser::ExpressionParser;
