//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundary between the domain and provider
//! integrations. Adapters implement them to talk to the real news APIs.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Article, HeadlinesQuery, SearchQuery};

/// Error type for a single provider fetch.
///
/// A `FetchError` is always contained within its provider: the aggregator
/// logs it and treats that provider as having contributed zero articles.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// Port for one upstream news provider.
///
/// Implementations own their immutable credentials and hold no per-request
/// state, so a single instance may be shared across concurrent requests.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Stable provider identifier, recorded on every article it produces
    fn id(&self) -> &'static str;

    /// Fetch top headlines, optionally filtered by category and country
    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<Vec<Article>, FetchError>;

    /// Search articles by keyword, optionally filtered by category
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, FetchError>;
}
