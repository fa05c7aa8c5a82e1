//! Search command - fan a keyword query out to every provider

use anyhow::Result;
use samachar_adapters::build_providers;
use samachar_domain::{Aggregator, Category, SearchQuery};
use std::path::PathBuf;

use crate::args::SearchArgs;
use crate::config::AppConfig;

pub async fn execute(args: SearchArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let aggregator = Aggregator::new(build_providers(&config.credentials()));

    let query = SearchQuery {
        query: args.query,
        category: args.category.as_deref().map(Category::parse),
        language: args
            .language
            .unwrap_or_else(|| config.defaults.language.clone()),
        page_size: args.page_size.unwrap_or(config.defaults.page_size),
    };

    tracing::info!(
        providers = aggregator.provider_count(),
        query = %query.query,
        "Searching news"
    );

    let response = match aggregator.search(&query).await {
        Ok(response) => response,
        Err(error) => super::fail_with_aggregate_error(&error),
    };

    super::print_response(&response)
}
