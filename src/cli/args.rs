//! CLI argument definitions and config-path resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

const DEFAULT_CONFIG: &str = "paramfetch.toml";
const CONFIG_ENV: &str = "PARAMFETCH_CONFIG";

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Interactively fetch AWS SSM parameters into JSON and env files",
    long_about = None
)]
pub struct FetchArgs {
    /// Path to paramfetch.toml (overrides PARAMFETCH_CONFIG).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Base directory holding one subdirectory per project.
    #[arg(long = "base-dir")]
    pub base_dir_override: Option<PathBuf>,
}

/// Resolve config path in the order: CLI override → env var → default.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    let path = override_path
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(cwd.join(path))
}
