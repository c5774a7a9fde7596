use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::{ListingCommand, ListingDispatch, StandaloneCommand, StandaloneDispatch};
use listing_query_rs::ListingError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` logs debug output of the
/// compiler and everything else stays at warnings.
fn init_tracing(cli: &Cli) {
    let default_directive = if cli.verbose {
        "lq=debug,listing_query_rs=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    if let Some(dispatch) = StandaloneDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    let config = load_config(ctx.config_path.as_deref())?;

    match ListingDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx, &config),
        None => Ok(()),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Listing(ListingError::UnknownSortAttribute { .. }) => {
            "UNKNOWN_SORT_ATTRIBUTE"
        }
        CommandError::Listing(ListingError::InvalidParameter { .. }) => "INVALID_PARAMETER",
        CommandError::Listing(ListingError::QueryString(_)) => "INVALID_QUERY",
        CommandError::Listing(ListingError::UnknownStatsOperation(_)) => "INVALID_ARGUMENT",
        CommandError::Listing(ListingError::Config(_)) | CommandError::Config(_) => {
            "CONFIG_ERROR"
        }
        CommandError::Input { .. } => "INPUT_ERROR",
        CommandError::Argument(_) => "INVALID_ARGUMENT",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Listing(ListingError::Config(_)) | CommandError::Config(_) => {
            ExitCode::from(5)
        }
        CommandError::Listing(_) | CommandError::Argument(_) => ExitCode::from(2),
        CommandError::Input { .. } | CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}
