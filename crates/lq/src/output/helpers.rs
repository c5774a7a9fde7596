//! Common helper functions for output formatting.

use listing_query_rs::filter::Value;
use listing_query_rs::sort::SortSpec;
use owo_colors::OwoColorize;

/// Widest a table column may grow.
pub const MAX_COLUMN_WIDTH: usize = 24;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Pads `s` on the right to `width` characters.
pub fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

/// Formats a record value for a table cell; null is shown as `-`.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Renders a sort spec in its query-string form, e.g. `-created;name`.
pub fn format_sort(sort: &SortSpec) -> String {
    sort.iter()
        .map(|key| {
            if key.descending {
                format!("-{}", key.attribute)
            } else {
                key.attribute.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Formats a table header line.
pub fn format_header(header: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}

/// Formats a number with at most four decimals, trimming trailing zeros.
pub fn format_number(n: f64) -> String {
    let s = format!("{n:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
