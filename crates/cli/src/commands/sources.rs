//! Sources command - list the providers the current configuration registers

use anyhow::Result;
use samachar_adapters::build_providers;
use std::path::PathBuf;

use crate::config::AppConfig;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let providers = build_providers(&config.credentials());

    if providers.is_empty() {
        println!("No providers configured.");
        println!();
        println!("Set API keys in config.toml or via environment variables, e.g.");
        println!("  SAMACHAR__PROVIDERS__NEWSAPI_API_KEY=...");
        return Ok(());
    }

    println!("Registered providers ({}):", providers.len());
    for provider in &providers {
        println!("  - {}", provider.id());
    }

    Ok(())
}
