//! Listing result output formatting.

use listing_query_rs::prelude::*;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value as Json;

use super::helpers::{format_header, format_sort, format_value, pad, truncate_str, MAX_COLUMN_WIDTH};

/// JSON output structure for the query command.
#[derive(Serialize)]
pub struct ListingOutput<'a> {
    pub metadata: &'a Metadata,
    pub results: &'a [&'a Json],
}

/// Formats a listing result as JSON.
pub fn format_listing_json(result: &ListingResult<&Json>) -> serde_json::Result<String> {
    let output = ListingOutput {
        metadata: &result.metadata,
        results: &result.results,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a listing result as a table with one column per schema attribute.
pub fn format_listing_table(
    result: &ListingResult<&Json>,
    schema: &EntitySchema,
    use_colors: bool,
) -> String {
    if result.results.is_empty() {
        return format!("No records found.\n{}", format_footer(&result.metadata));
    }

    let columns: Vec<&str> = schema.names().collect();
    let rows: Vec<Vec<String>> = result
        .results
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| truncate_str(&format_value(&record.value(column)), MAX_COLUMN_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();

    let header = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(column, *width))
        .collect::<Vec<_>>()
        .join("  ");
    output.push_str(&format_header(header.trim_end(), use_colors));

    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ");
        output.push_str(line.trim_end());
        output.push('\n');
    }

    let footer = format_footer(&result.metadata);
    if use_colors {
        output.push_str(&format!("\n{}", footer.dimmed()));
    } else {
        output.push('\n');
        output.push_str(&footer);
    }
    output
}

/// Summary line: range, page and the applied sort and filter.
fn format_footer(metadata: &Metadata) -> String {
    let mut footer = if metadata.end_index > metadata.start_index {
        format!(
            "Showing {}-{} of {}",
            metadata.start_index + 1,
            metadata.end_index,
            metadata.count
        )
    } else {
        format!("Showing 0 of {}", metadata.count)
    };
    footer.push_str(&format!(
        " (page {} of {})",
        metadata.current_page, metadata.number_of_pages
    ));
    if !metadata.sort.is_empty() {
        footer.push_str(&format!("\nSort: {}", format_sort(&metadata.sort)));
    }
    if let Some(filter) = &metadata.filter {
        footer.push_str(&format!("\nFilter: {filter}"));
    }
    footer.push('\n');
    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> EntitySchema {
        EntitySchema::new()
            .with_attribute("name", AttributeSpec::new(SemanticType::String))
            .with_attribute("age", AttributeSpec::new(SemanticType::Integer))
    }

    fn run<'r>(records: &'r [Json], query: &str) -> (EntitySchema, ListingResult<&'r Json>) {
        let schema = schema();
        let config = ListingConfig::default();
        let params = ListingParameters::from_query(query).unwrap();
        let compiled = ListingQuery::new(&schema, &config).compile(&params).unwrap();
        let result = Listing::execute(records, &compiled);
        (schema, result)
    }

    #[test]
    fn test_table_columns_and_footer() {
        let records = vec![
            json!({ "name": "Anna", "age": 31 }),
            json!({ "name": "Bob", "age": null }),
        ];
        let (schema, result) = run(&records, "sort=name&filter-name=a");
        let table = format_listing_table(&result, &schema, false);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "age  name");
        assert_eq!(lines[1], "31   Anna");
        assert!(table.contains("Showing 1-1 of 1 (page 1 of 1)"));
        assert!(table.contains("Sort: name"));
        assert!(table.contains("Filter: (name LIKE '%a%')"));
    }

    #[test]
    fn test_table_null_cells() {
        let records = vec![json!({ "name": "Bob" })];
        let (schema, result) = run(&records, "");
        let table = format_listing_table(&result, &schema, false);
        assert!(table.lines().nth(1).unwrap().starts_with("-    Bob"));
    }

    #[test]
    fn test_table_empty() {
        let records = vec![json!({ "name": "Bob" })];
        let (schema, result) = run(&records, "filter-name=zzz");
        let table = format_listing_table(&result, &schema, false);
        assert!(table.starts_with("No records found."));
        assert!(table.contains("Showing 0 of 0"));
    }

    #[test]
    fn test_json_output() {
        let records = vec![json!({ "name": "Anna", "age": 31 })];
        let (_, result) = run(&records, "limit=5");
        let output: Json = serde_json::from_str(&format_listing_json(&result).unwrap()).unwrap();

        assert_eq!(output["metadata"]["count"], 1);
        assert_eq!(output["metadata"]["limit"], 5);
        assert_eq!(output["results"][0]["name"], "Anna");
    }
}
