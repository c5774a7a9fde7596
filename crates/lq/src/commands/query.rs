//! Query command implementation.
//!
//! Filters, sorts and pages the records of a JSON file.

use std::path::PathBuf;

use listing_query_rs::prelude::*;

use super::input::{compile, load_records};
use super::{CommandContext, Result};
use crate::cli::ListingArgs;
use crate::output::{format_listing_json, format_listing_table};

/// Options for the query command.
#[derive(Debug)]
pub struct QueryOptions<'a> {
    /// Schema, filter, sort and page inputs.
    pub listing: &'a ListingArgs,
    /// Records file.
    pub data: &'a PathBuf,
}

/// Executes the query command.
///
/// # Errors
///
/// Returns an error if an input file cannot be loaded or the sort names an
/// unknown attribute.
pub fn execute(ctx: &CommandContext, opts: &QueryOptions, config: &ListingConfig) -> Result<()> {
    let (schema, compiled) = compile(opts.listing, config)?;
    let records = load_records(opts.data)?;
    let result = Listing::execute(&records, &compiled);

    if ctx.json_output {
        println!("{}", format_listing_json(&result)?);
    } else if !ctx.quiet {
        print!("{}", format_listing_table(&result, &schema, ctx.use_colors));
    }

    Ok(())
}
