//! Config command - configuration management

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::args::{ConfigArgs, ConfigCommands};
use crate::config::AppConfig;

pub async fn execute(args: ConfigArgs, config_path: Option<PathBuf>) -> Result<()> {
    match args.command {
        ConfigCommands::Init { path, force } => init(path, force),
        ConfigCommands::Show => show(config_path),
    }
}

fn init(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    std::fs::write(&path, AppConfig::example_toml())
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Wrote example configuration to {}", path.display());
    Ok(())
}

fn show(config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let json = serde_json::to_string_pretty(&config.redacted_json())
        .context("Failed to serialize configuration")?;
    println!("{}", json);

    Ok(())
}
