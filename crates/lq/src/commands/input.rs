//! Loading of schema, record and predicate files, and assembly of listing
//! parameters from command-line arguments.

use std::fs;
use std::path::Path;

use listing_query_rs::error::find_similar_name;
use listing_query_rs::prelude::*;
use serde_json::Value as Json;

use super::{CommandError, Result};
use crate::cli::ListingArgs;

/// Loads an entity schema from a JSON or TOML file.
///
/// The format is picked by extension; anything other than `.toml` is read as
/// JSON.
pub fn load_schema(path: &Path) -> Result<EntitySchema> {
    let text = read(path)?;
    let schema: EntitySchema = if has_extension(path, "toml") {
        toml::from_str(&text).map_err(|e| CommandError::input(path, e))?
    } else {
        serde_json::from_str(&text).map_err(|e| CommandError::input(path, e))?
    };

    if schema.is_empty() {
        return Err(CommandError::input(path, "schema declares no attributes"));
    }
    tracing::debug!(path = %path.display(), attributes = schema.len(), "loaded schema");
    Ok(schema)
}

/// Loads records from a JSON file holding an array of objects.
pub fn load_records(path: &Path) -> Result<Vec<Json>> {
    let text = read(path)?;
    let value: Json = serde_json::from_str(&text).map_err(|e| CommandError::input(path, e))?;

    let Json::Array(records) = value else {
        return Err(CommandError::input(path, "expected a JSON array of objects"));
    };
    if let Some(position) = records.iter().position(|r| !r.is_object()) {
        return Err(CommandError::input(
            path,
            format!("record {position} is not an object"),
        ));
    }
    tracing::debug!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

/// Loads a caller-supplied predicate tree from a JSON file.
pub fn load_predicate(path: &Path) -> Result<PredicateSpec> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|e| CommandError::input(path, e))
}

/// Builds listing parameters from the command-line arguments.
///
/// `--query` is bound first; the dedicated flags then override or extend it.
pub fn build_parameters(args: &ListingArgs, config: &ListingConfig) -> Result<ListingParameters> {
    let mut params = match args.query.as_deref() {
        Some(query) => ListingParameters::from_query(query)?,
        None => ListingParameters::new(),
    };

    if let Some(filter) = &args.filter {
        params = params.with_filter(filter);
    }
    for pair in &args.filter_attrs {
        let (attribute, value) = pair.split_once('=').ok_or_else(|| {
            CommandError::Argument(format!("expected ATTR=VALUE, got '{pair}'"))
        })?;
        params.add_filter_attribute(attribute, value);
    }
    if args.or {
        params.add_filter_attribute(&config.disjunction_key, "true");
    }
    if let Some(path) = &args.predicate {
        params = params.with_predicate(load_predicate(path)?);
    }
    if let Some(sort) = &args.sort {
        params = params.with_sort(sort);
    }
    if args.index.is_some() {
        params.index = args.index;
    }
    if args.page.is_some() {
        params.page = args.page;
    }
    if args.limit.is_some() {
        params.limit = args.limit;
    }

    Ok(params)
}

/// Loads the schema and compiles the listing arguments against it.
pub fn compile(args: &ListingArgs, config: &ListingConfig) -> Result<(EntitySchema, CompiledListing)> {
    let schema = load_schema(&args.schema)?;
    let params = build_parameters(args, config)?;
    let compiled = ListingQuery::new(&schema, config).compile(&params)?;
    Ok((schema, compiled))
}

/// Checks that `attribute` is declared, suggesting a close name if not.
pub fn require_attribute<'s>(schema: &'s EntitySchema, attribute: &str) -> Result<&'s AttributeSpec> {
    schema.attribute(attribute).ok_or_else(|| {
        let suggestion = find_similar_name(attribute, schema.names())
            .map(|name| format!(" Did you mean '{name}'?"))
            .unwrap_or_default();
        CommandError::Argument(format!("unknown attribute '{attribute}'.{suggestion}"))
    })
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| CommandError::input(path, e))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
