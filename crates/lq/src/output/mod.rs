//! Output formatting utilities for the lq CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by command:
//!
//! - [`listing`] - Result pages (query)
//! - [`explain`] - Compiled condition trees (explain)
//! - [`stats`] - Aggregates and term counts (stats, terms)
//! - [`helpers`] - Common formatting utilities (truncation, padding, values)

mod explain;
pub mod helpers;
mod listing;
mod stats;

// Query
pub use listing::{format_listing_json, format_listing_table};

// Explain
pub use explain::{format_explain_json, format_explain_table};

// Stats and terms
pub use stats::{format_stats_json, format_stats_table, format_terms_json, format_terms_table};
