//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands are split by whether they need the listing configuration:
//! `config`, `completions` and bare `lq` run without loading it, every
//! query command receives the loaded snapshot.

use std::path::PathBuf;

use listing_query_rs::config::ListingConfig;

use crate::cli::{Cli, Commands, ConfigCommands, ListingArgs, Shell, StatsOp};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without a listing configuration.
pub trait StandaloneCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that compile listings.
pub trait ListingCommand {
    /// Execute the command with the loaded configuration.
    fn execute(&self, ctx: &CommandContext, config: &ListingConfig) -> Result<()>;
}

/// Commands that don't need the listing configuration.
pub enum StandaloneDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> StandaloneDispatch<'a> {
    /// Try to create a standalone dispatch from the CLI command.
    /// Returns None if the command compiles a listing.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl StandaloneCommand for StandaloneDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("lq - listing query compiler");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
    }
}

/// Commands that compile a listing.
pub enum ListingDispatch<'a> {
    Query {
        listing: &'a ListingArgs,
        data: &'a PathBuf,
    },
    Explain {
        listing: &'a ListingArgs,
    },
    Stats {
        listing: &'a ListingArgs,
        data: &'a PathBuf,
        attribute: &'a str,
        op: StatsOp,
    },
    Terms {
        listing: &'a ListingArgs,
        data: &'a PathBuf,
        attribute: &'a str,
        max: Option<usize>,
    },
}

impl<'a> ListingDispatch<'a> {
    /// Create a listing dispatch from the CLI command.
    /// Returns None if the command runs standalone.
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Query { listing, data }) => Some(Self::Query { listing, data }),
            Some(Commands::Explain { listing }) => Some(Self::Explain { listing }),
            Some(Commands::Stats {
                listing,
                data,
                attribute,
                op,
            }) => Some(Self::Stats {
                listing,
                data,
                attribute,
                op: *op,
            }),
            Some(Commands::Terms {
                listing,
                data,
                attribute,
                max,
            }) => Some(Self::Terms {
                listing,
                data,
                attribute,
                max: *max,
            }),
            Some(Commands::Config { .. }) | Some(Commands::Completions { .. }) | None => None,
        }
    }
}

impl ListingCommand for ListingDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, config: &ListingConfig) -> Result<()> {
        match self {
            Self::Query { listing, data } => {
                let opts = commands::query::QueryOptions { listing, data };
                commands::query::execute(ctx, &opts, config)
            }
            Self::Explain { listing } => commands::explain::execute(ctx, listing, config),
            Self::Stats {
                listing,
                data,
                attribute,
                op,
            } => {
                let opts = commands::stats::StatsOptions {
                    listing,
                    data,
                    attribute,
                    op: *op,
                };
                commands::stats::execute(ctx, &opts, config)
            }
            Self::Terms {
                listing,
                data,
                attribute,
                max,
            } => {
                let opts = commands::terms::TermsOptions {
                    listing,
                    data,
                    attribute,
                    max: *max,
                };
                commands::terms::execute(ctx, &opts, config)
            }
        }
    }
}
