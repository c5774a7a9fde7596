//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the lq CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// lq - compile and run listing queries against JSON records
#[derive(Parser, Debug)]
#[command(name = "lq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (log compilation steps to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Listing configuration file (default: $LQ_CONFIG or ~/.config/lq/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter, sort and page records
    #[command(alias = "q")]
    Query {
        #[command(flatten)]
        listing: ListingArgs,

        /// JSON file holding an array of records
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Print the compiled condition, sort and page without running it
    #[command(alias = "x")]
    Explain {
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Aggregate a numeric attribute over the matching records
    Stats {
        #[command(flatten)]
        listing: ListingArgs,

        /// JSON file holding an array of records
        #[arg(short, long)]
        data: PathBuf,

        /// Attribute to aggregate
        #[arg(short, long)]
        attribute: String,

        /// Aggregate to compute
        #[arg(long, value_enum, default_value = "all")]
        op: StatsOp,
    },

    /// Most frequent values of an attribute among the matching records
    Terms {
        #[command(flatten)]
        listing: ListingArgs,

        /// JSON file holding an array of records
        #[arg(short, long)]
        data: PathBuf,

        /// Attribute to count values of
        #[arg(short, long)]
        attribute: String,

        /// Number of terms to show (default: the configured default limit)
        #[arg(long)]
        max: Option<usize>,
    },

    /// View and initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Listing inputs shared by every query command.
#[derive(Args, Debug, Clone, Default)]
pub struct ListingArgs {
    /// Schema file (JSON or TOML) mapping attribute names to types
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Raw query string, e.g. "filter-age=>30&sort=-age&page=2"
    #[arg(long)]
    pub query: Option<String>,

    /// Global search term
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Attribute filter as attr=value (repeatable)
    #[arg(short = 'F', long = "filter-attr", value_name = "ATTR=VALUE", action = clap::ArgAction::Append)]
    pub filter_attrs: Vec<String>,

    /// Combine attribute filters with OR instead of AND
    #[arg(long)]
    pub or: bool,

    /// JSON file holding a predicate tree
    #[arg(long)]
    pub predicate: Option<PathBuf>,

    /// Sort keys, e.g. "-created;name"
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Absolute offset of the first result
    #[arg(long, allow_negative_numbers = true)]
    pub index: Option<i64>,

    /// One-based page number
    #[arg(short, long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Page size (0 = unbounded)
    #[arg(short, long, allow_negative_numbers = true)]
    pub limit: Option<i64>,
}

/// Aggregates for the stats command
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsOp {
    Count,
    Min,
    Max,
    Avg,
    Sum,
    All,
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Print config file path
    Path,

    /// Write the default configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["lq"]);
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["lq", "--json", "--no-color", "-v", "config", "path"]);
        assert!(cli.json);
        assert!(cli.no_color);
        assert!(cli.verbose);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["lq", "-v", "-q", "config"]).is_err());
    }

    #[test]
    fn test_query_alias() {
        let cli = Cli::parse_from(["lq", "q", "-s", "schema.json", "-d", "data.json"]);
        assert!(matches!(cli.command, Some(Commands::Query { .. })));
    }

    #[test]
    fn test_query_with_options() {
        let cli = Cli::parse_from([
            "lq",
            "query",
            "--schema",
            "schema.json",
            "--data",
            "data.json",
            "-F",
            "age=>30",
            "-F",
            "name=ann*",
            "--or",
            "--sort",
            "-age;name",
            "--page",
            "2",
            "--limit",
            "5",
        ]);
        if let Some(Commands::Query { listing, data }) = cli.command {
            assert_eq!(data, PathBuf::from("data.json"));
            assert_eq!(listing.filter_attrs, vec!["age=>30", "name=ann*"]);
            assert!(listing.or);
            assert_eq!(listing.sort.as_deref(), Some("-age;name"));
            assert_eq!(listing.page, Some(2));
            assert_eq!(listing.limit, Some(5));
        } else {
            panic!("Expected Query command");
        }
    }

    #[test]
    fn test_negative_index_is_accepted() {
        let cli = Cli::parse_from(["lq", "explain", "-s", "schema.json", "--index", "-5"]);
        if let Some(Commands::Explain { listing }) = cli.command {
            assert_eq!(listing.index, Some(-5));
        } else {
            panic!("Expected Explain command");
        }
    }

    #[test]
    fn test_query_requires_data() {
        assert!(Cli::try_parse_from(["lq", "query", "-s", "schema.json"]).is_err());
    }

    #[test]
    fn test_stats_op() {
        let cli = Cli::parse_from([
            "lq", "stats", "-s", "s.json", "-d", "d.json", "-a", "age", "--op", "avg",
        ]);
        if let Some(Commands::Stats { attribute, op, .. }) = cli.command {
            assert_eq!(attribute, "age");
            assert_eq!(op, StatsOp::Avg);
        } else {
            panic!("Expected Stats command");
        }
        assert!(Cli::try_parse_from([
            "lq", "stats", "-s", "s.json", "-d", "d.json", "-a", "age", "--op", "median",
        ])
        .is_err());
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["lq", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: Some(ConfigCommands::Init { force: true })
            })
        ));
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["lq", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
