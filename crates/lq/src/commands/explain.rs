//! Explain command implementation.
//!
//! Prints what a listing request compiles to, without any records.

use listing_query_rs::config::ListingConfig;

use super::input::compile;
use super::{CommandContext, Result};
use crate::cli::ListingArgs;
use crate::output::{format_explain_json, format_explain_table};

/// Executes the explain command.
pub fn execute(ctx: &CommandContext, listing: &ListingArgs, config: &ListingConfig) -> Result<()> {
    let (_, compiled) = compile(listing, config)?;

    if ctx.json_output {
        println!("{}", format_explain_json(&compiled)?);
    } else if !ctx.quiet {
        print!("{}", format_explain_table(&compiled, ctx.use_colors));
    }

    Ok(())
}
