//! Stats and terms output formatting.

use listing_query_rs::prelude::*;
use serde::Serialize;

use super::helpers::{format_header, format_number, format_value, pad, truncate_str, MAX_COLUMN_WIDTH};

/// JSON output structure for the stats command.
#[derive(Serialize)]
pub struct StatsOutput<'a> {
    pub attribute: &'a str,
    pub operation: String,
    pub stats: &'a Stats,
}

/// JSON output structure for the terms command.
#[derive(Serialize)]
pub struct TermsOutput<'a> {
    pub attribute: &'a str,
    pub terms: &'a [Term],
}

/// Formats stats as JSON.
pub fn format_stats_json(
    attribute: &str,
    operation: StatsOperation,
    stats: &Stats,
) -> serde_json::Result<String> {
    let output = StatsOutput {
        attribute,
        operation: operation.to_string(),
        stats,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats stats as `name: value` lines, skipping aggregates not computed.
pub fn format_stats_table(attribute: &str, stats: &Stats, use_colors: bool) -> String {
    let mut output = format_header(&format!("Stats for '{attribute}'"), use_colors);

    if let Some(count) = stats.count {
        output.push_str(&format!("  count: {count}\n"));
    }
    let aggregates = [
        ("min", stats.min),
        ("max", stats.max),
        ("avg", stats.avg),
        ("sum", stats.sum),
    ];
    for (name, value) in aggregates {
        if let Some(value) = value {
            output.push_str(&format!("  {name}: {}\n", format_number(value)));
        }
    }
    if stats == &Stats::default() {
        output.push_str("  (no values)\n");
    }
    output
}

/// Formats terms as JSON.
pub fn format_terms_json(attribute: &str, terms: &[Term]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&TermsOutput { attribute, terms })
}

/// Formats terms as a two-column table.
pub fn format_terms_table(attribute: &str, terms: &[Term], use_colors: bool) -> String {
    if terms.is_empty() {
        return format!("No values of '{attribute}' found.\n");
    }

    let values: Vec<String> = terms
        .iter()
        .map(|term| truncate_str(&format_value(&term.value), MAX_COLUMN_WIDTH))
        .collect();
    let width = values
        .iter()
        .map(|v| v.chars().count())
        .chain(std::iter::once(attribute.chars().count()))
        .max()
        .unwrap_or(0);

    let mut output = format_header(&format!("{}  Count", pad(attribute, width)), use_colors);
    for (value, term) in values.iter().zip(terms) {
        output.push_str(&format!("{}  {}\n", pad(value, width), term.count));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_table() {
        let stats = Stats {
            count: Some(3),
            min: Some(25.0),
            max: Some(47.0),
            avg: Some(97.0 / 3.0),
            sum: Some(97.0),
        };
        let table = format_stats_table("age", &stats, false);
        assert_eq!(
            table,
            "Stats for 'age'\n  count: 3\n  min: 25\n  max: 47\n  avg: 32.3333\n  sum: 97\n"
        );
    }

    #[test]
    fn test_stats_table_single_op() {
        let stats = Stats {
            avg: Some(2.5),
            ..Stats::default()
        };
        let table = format_stats_table("age", &stats, false);
        assert!(table.contains("avg: 2.5"));
        assert!(!table.contains("count"));
    }

    #[test]
    fn test_stats_json() {
        let stats = Stats {
            count: Some(0),
            ..Stats::default()
        };
        let json: serde_json::Value =
            serde_json::from_str(&format_stats_json("age", StatsOperation::Count, &stats).unwrap())
                .unwrap();
        assert_eq!(json["operation"], "count");
        assert_eq!(json["stats"]["count"], 0);
        assert!(json["stats"].get("avg").is_none());
    }

    #[test]
    fn test_terms_table() {
        let terms = vec![
            Term {
                value: Value::Text("Berlin".into()),
                count: 3,
            },
            Term {
                value: Value::Null,
                count: 1,
            },
        ];
        let table = format_terms_table("city", &terms, false);
        assert_eq!(table, "city    Count\nBerlin  3\n-       1\n");
    }

    #[test]
    fn test_terms_empty() {
        assert_eq!(
            format_terms_table("city", &[], false),
            "No values of 'city' found.\n"
        );
    }
}
