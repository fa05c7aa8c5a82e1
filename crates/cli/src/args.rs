//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// samachar: aggregate news from multiple provider APIs
#[derive(Parser, Debug)]
#[command(name = "samachar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch top headlines from every configured provider
    Headlines(HeadlinesArgs),

    /// Search news by keyword across every configured provider
    Search(SearchArgs),

    /// List registered providers
    Sources,

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct HeadlinesArgs {
    /// Category filter (business, technology, sports, entertainment,
    /// science, world, india, health)
    #[arg(long)]
    pub category: Option<String>,

    /// ISO 3166 country code; pass an empty string to skip country filtering
    #[arg(long)]
    pub country: Option<String>,

    /// Language code
    #[arg(long)]
    pub language: Option<String>,

    /// Maximum number of articles to return (1-100)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search keyword
    pub query: String,

    /// Category filter
    #[arg(long)]
    pub category: Option<String>,

    /// Language code
    #[arg(long)]
    pub language: Option<String>,

    /// Maximum number of articles to return (1-100)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration with secrets redacted
    Show,
}
