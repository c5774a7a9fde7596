//! Prelude module for convenient imports.
//!
//! ```
//! use listing_query_rs::prelude::*;
//! ```

// Configuration and schema
pub use crate::config::{ConfigError, ListingConfig};
pub use crate::schema::{AttributeSpec, EntitySchema, SchemaRegistry, SemanticType};

// Error types
pub use crate::error::{ListingError, Result};

// Compilation
pub use crate::filter::{Condition, PredicateNode, PredicateSpec, TreeBuilder, TypedLiteral};
pub use crate::page::PageSpec;
pub use crate::params::ListingParameters;
pub use crate::query::{CompiledListing, ListingQuery};
pub use crate::sort::{SortKey, SortSpec};

// In-memory execution
pub use crate::filter::{ConditionEvaluator, Record, Value};
pub use crate::listing::{Listing, ListingResult, Metadata, Stats, StatsOperation, Term};
