//! Config command implementation.
//!
//! View and initialize the listing configuration.
//! Config file is located at ~/.config/lq/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use listing_query_rs::config::{ConfigError, ListingConfig};

use super::{CommandContext, Result};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "LQ_CONFIG";

/// Header written above the generated default config.
const CONFIG_HEADER: &str = "# lq - listing query configuration\n\
# Every key is optional; removed keys fall back to the built-in defaults.\n\n";

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/lq/ on all platforms.
fn get_config_dir() -> std::result::Result<PathBuf, ConfigError> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        if !xdg_config.is_empty() {
            return Ok(PathBuf::from(xdg_config).join("lq"));
        }
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("lq"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Gets the config file path.
///
/// Priority: explicit `--config` path, then `$LQ_CONFIG`, then the XDG
/// config directory.
pub fn get_config_path(explicit: Option<&Path>) -> std::result::Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    Ok(get_config_dir()?.join("config.toml"))
}

/// Loads the configuration, falling back to defaults if no file exists.
pub fn load_config(explicit: Option<&Path>) -> Result<ListingConfig> {
    let path = get_config_path(explicit)?;

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ListingConfig::default());
    }

    Ok(ListingConfig::load(&path)?)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;
    let config = load_config(Some(&path))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());
        if !path.exists() {
            println!("(No config file exists. Run 'lq config init' to create one.)\n");
        }
        print!("{}", config.to_toml_string()?);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Outcome of `config init`.
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Overwritten,
    Exists,
}

/// Writes the default configuration to `path`.
///
/// An existing file is kept unless `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> Result<InitOutcome> {
    let existed = path.exists();
    if existed && !force {
        return Ok(InitOutcome::Exists);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = ListingConfig::default().to_toml_string()?;
    fs::write(path, format!("{CONFIG_HEADER}{body}"))?;

    Ok(if existed {
        InitOutcome::Overwritten
    } else {
        InitOutcome::Created
    })
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;
    let outcome = write_default_config(&path, force)?;

    if ctx.json_output {
        let status = match outcome {
            InitOutcome::Created => "created",
            InitOutcome::Overwritten => "overwritten",
            InitOutcome::Exists => "exists",
        };
        let output = serde_json::json!({
            "status": status,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        match outcome {
            InitOutcome::Created => println!("Created default config at: {}", path.display()),
            InitOutcome::Overwritten => {
                println!("Overwrote config at: {}", path.display())
            }
            InitOutcome::Exists => eprintln!(
                "Config already exists at: {} (use --force to overwrite)",
                path.display()
            ),
        }
    }

    Ok(())
}
