//! Stats command implementation.
//!
//! Aggregates a numeric attribute over the records matching a listing.

use std::path::PathBuf;

use listing_query_rs::prelude::*;

use super::input::{compile, load_records, require_attribute};
use super::{CommandContext, CommandError, Result};
use crate::cli::{ListingArgs, StatsOp};
use crate::output::{format_stats_json, format_stats_table};

/// Options for the stats command.
#[derive(Debug)]
pub struct StatsOptions<'a> {
    pub listing: &'a ListingArgs,
    pub data: &'a PathBuf,
    pub attribute: &'a str,
    pub op: StatsOp,
}

impl From<StatsOp> for StatsOperation {
    fn from(op: StatsOp) -> Self {
        match op {
            StatsOp::Count => StatsOperation::Count,
            StatsOp::Min => StatsOperation::Min,
            StatsOp::Max => StatsOperation::Max,
            StatsOp::Avg => StatsOperation::Avg,
            StatsOp::Sum => StatsOperation::Sum,
            StatsOp::All => StatsOperation::All,
        }
    }
}

/// Executes the stats command.
///
/// # Errors
///
/// Returns an error if the attribute is unknown or not numeric, or if the
/// listing cannot be compiled.
pub fn execute(ctx: &CommandContext, opts: &StatsOptions, config: &ListingConfig) -> Result<()> {
    let (schema, compiled) = compile(opts.listing, config)?;
    let spec = require_attribute(&schema, opts.attribute)?;
    if !spec.effective_type().is_numeric() {
        return Err(CommandError::Argument(format!(
            "attribute '{}' is {}, stats need a numeric attribute",
            opts.attribute,
            spec.effective_type()
        )));
    }

    let records = load_records(opts.data)?;
    let operation = StatsOperation::from(opts.op);
    let stats = Listing::stats(&records, &compiled, opts.attribute, operation);

    if ctx.json_output {
        println!("{}", format_stats_json(opts.attribute, operation, &stats)?);
    } else if !ctx.quiet {
        print!("{}", format_stats_table(opts.attribute, &stats, ctx.use_colors));
    }

    Ok(())
}
