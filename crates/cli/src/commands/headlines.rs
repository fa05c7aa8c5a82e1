//! Headlines command - fan a top-headlines query out to every provider

use anyhow::Result;
use samachar_adapters::build_providers;
use samachar_domain::{Aggregator, Category, HeadlinesQuery};
use std::path::PathBuf;

use crate::args::HeadlinesArgs;
use crate::config::AppConfig;

pub async fn execute(args: HeadlinesArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let aggregator = Aggregator::new(build_providers(&config.credentials()));

    let query = HeadlinesQuery {
        category: args.category.as_deref().map(Category::parse),
        country: args
            .country
            .unwrap_or_else(|| config.defaults.country.clone()),
        language: args
            .language
            .unwrap_or_else(|| config.defaults.language.clone()),
        page_size: args.page_size.unwrap_or(config.defaults.page_size),
    };

    tracing::info!(
        providers = aggregator.provider_count(),
        category = query.category.map(|c| c.as_str()),
        country = %query.country,
        "Fetching top headlines"
    );

    let response = match aggregator.top_headlines(&query).await {
        Ok(response) => response,
        Err(error) => super::fail_with_aggregate_error(&error),
    };

    super::print_response(&response)
}
