//! Compiled listing output formatting (explain command).

use listing_query_rs::prelude::*;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::format_sort;

/// JSON output structure for the explain command.
#[derive(Serialize)]
pub struct ExplainOutput<'a> {
    /// Single-line rendering of the condition.
    pub rendered: Option<String>,
    pub leaves: usize,
    #[serde(flatten)]
    pub compiled: &'a CompiledListing,
}

/// Formats a compiled listing as JSON.
pub fn format_explain_json(compiled: &CompiledListing) -> serde_json::Result<String> {
    let output = ExplainOutput {
        rendered: compiled.condition.as_ref().map(ToString::to_string),
        leaves: compiled.condition.as_ref().map_or(0, Condition::leaf_count),
        compiled,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a compiled listing as an indented tree.
pub fn format_explain_table(compiled: &CompiledListing, use_colors: bool) -> String {
    let mut output = String::new();

    output.push_str(&label("Condition:", use_colors));
    match &compiled.condition {
        Some(condition) => write_condition(&mut output, condition, 1, use_colors),
        None => output.push_str("  (none)\n"),
    }

    output.push_str(&label("Sort:", use_colors));
    if compiled.sort.is_empty() {
        output.push_str("  (none)\n");
    } else {
        output.push_str(&format!("  {}\n", format_sort(&compiled.sort)));
    }

    let page = compiled.page;
    output.push_str(&label("Page:", use_colors));
    let limit = if page.is_unbounded() {
        "unbounded".to_string()
    } else {
        page.limit.to_string()
    };
    output.push_str(&format!(
        "  offset {}, limit {}, page {}\n",
        page.offset, limit, page.page
    ));

    output
}

fn label(text: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", text.bold())
    } else {
        format!("{text}\n")
    }
}

fn write_condition(output: &mut String, condition: &Condition, depth: usize, use_colors: bool) {
    let indent = "  ".repeat(depth);
    match condition {
        Condition::Leaf { attribute, literal } => {
            output.push_str(&format!("{indent}{attribute} {literal}\n"));
        }
        Condition::Group {
            mode,
            negated,
            children,
        } => {
            let keyword = match (*negated, children.len()) {
                (true, 1) => "NOT".to_string(),
                (true, _) => format!("NOT {mode}"),
                (false, _) => mode.to_string(),
            };
            if use_colors {
                if *negated {
                    output.push_str(&format!("{indent}{}\n", keyword.red().bold()));
                } else {
                    output.push_str(&format!("{indent}{}\n", keyword.cyan().bold()));
                }
            } else {
                output.push_str(&format!("{indent}{keyword}\n"));
            }
            for child in children {
                write_condition(output, child, depth + 1, use_colors);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(query: &str) -> CompiledListing {
        let schema = EntitySchema::new()
            .with_attribute("name", AttributeSpec::new(SemanticType::String))
            .with_attribute("age", AttributeSpec::new(SemanticType::Integer));
        let config = ListingConfig::default();
        let params = ListingParameters::from_query(query).unwrap();
        ListingQuery::new(&schema, &config).compile(&params).unwrap()
    }

    #[test]
    fn test_tree_rendering() {
        let compiled = compile("filter-age=%3E30&filter-name=!ann|bob&sort=-age&page=2");
        let text = format_explain_table(&compiled, false);

        let expected = "\
Condition:
  AND
    age > 30
    OR
      NOT
        name LIKE '%ann%'
      name LIKE '%bob%'
Sort:
  -age
Page:
  offset 10, limit 10, page 2
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_listing() {
        let compiled = compile("limit=0");
        let text = format_explain_table(&compiled, false);
        assert!(text.contains("Condition:\n  (none)"));
        assert!(text.contains("Sort:\n  (none)"));
        assert!(text.contains("offset 0, limit unbounded, page 1"));
    }

    #[test]
    fn test_json_output() {
        let compiled = compile("filter-age=5&sort=name");
        let json: serde_json::Value =
            serde_json::from_str(&format_explain_json(&compiled).unwrap()).unwrap();

        assert_eq!(json["rendered"], "(age = 5)");
        assert_eq!(json["leaves"], 1);
        assert_eq!(json["sort"][0]["attribute"], "name");
        assert_eq!(json["page"]["limit"], 10);
    }
}
