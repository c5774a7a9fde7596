//! Command implementations for the lq CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod explain;
pub mod input;
pub mod query;
pub mod stats;
pub mod terms;

use std::path::PathBuf;

use listing_query_rs::config::ConfigError;
use listing_query_rs::ListingError;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Sort or parameter error from the compiler.
    #[error("listing error: {0}")]
    Listing(#[from] ListingError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A schema, data or predicate file could not be used.
    #[error("invalid input '{path}': {message}")]
    Input {
        /// The offending file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// A command-line argument could not be interpreted.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Creates an input error for `path`.
    pub fn input(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Input {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Explicit config file from `--config`.
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color,
            quiet: cli.quiet,
            config_path: cli.config.clone(),
        }
    }
}
