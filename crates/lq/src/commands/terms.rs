//! Terms command implementation.
//!
//! Counts the distinct values of an attribute among the matching records.

use std::path::PathBuf;

use listing_query_rs::prelude::*;

use super::input::{compile, load_records, require_attribute};
use super::{CommandContext, Result};
use crate::cli::ListingArgs;
use crate::output::{format_terms_json, format_terms_table};

/// Options for the terms command.
#[derive(Debug)]
pub struct TermsOptions<'a> {
    pub listing: &'a ListingArgs,
    pub data: &'a PathBuf,
    pub attribute: &'a str,
    /// Falls back to the configured default limit; `0` lists every value.
    pub max: Option<usize>,
}

/// Executes the terms command.
pub fn execute(ctx: &CommandContext, opts: &TermsOptions, config: &ListingConfig) -> Result<()> {
    let (schema, compiled) = compile(opts.listing, config)?;
    require_attribute(&schema, opts.attribute)?;

    let records = load_records(opts.data)?;
    let max = match opts.max.unwrap_or(config.default_limit) {
        0 => usize::MAX,
        max => max,
    };
    let terms = Listing::terms(&records, &compiled, opts.attribute, max);

    if ctx.json_output {
        println!("{}", format_terms_json(opts.attribute, &terms)?);
    } else if !ctx.quiet {
        print!("{}", format_terms_table(opts.attribute, &terms, ctx.use_colors));
    }

    Ok(())
}
