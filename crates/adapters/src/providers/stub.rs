//! Deterministic stub provider for offline testing
//!
//! Returns canned articles without any network traffic. Registered via the
//! `stub` config flag so the CLI can be exercised end to end with no
//! credentials.

use async_trait::async_trait;
use samachar_domain::{Article, FetchError, HeadlinesQuery, NewsProvider, SearchQuery};

const PROVIDER_ID: &str = "stub";

#[derive(Debug, Default)]
pub struct StubProvider;

impl StubProvider {
    pub fn new() -> Self {
        Self
    }

    fn canned(&self, label: &str, count: usize) -> Vec<Article> {
        (0..count)
            .map(|n| Article {
                title: format!("Stub {label} article {n}"),
                description: format!("Deterministic {label} fixture {n}"),
                url: format!("https://stub.invalid/{label}/{n}"),
                published_at: format!("2024-01-{:02}T00:00:00Z", n + 1),
                source_name: "Stub Wire".to_string(),
                content: format!("Deterministic {label} fixture {n}"),
                provider_id: PROVIDER_ID.to_string(),
                ..Article::default()
            })
            .collect()
    }
}

#[async_trait]
impl NewsProvider for StubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<Vec<Article>, FetchError> {
        Ok(self.canned("headline", query.page_size.min(3)))
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, FetchError> {
        Ok(self.canned("search", query.page_size.min(3)))
    }
}
