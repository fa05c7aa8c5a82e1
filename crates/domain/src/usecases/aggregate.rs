//! Multi-provider aggregation use case
//!
//! Fans a query out to every registered provider concurrently, merges the
//! partial results in completion order, then dedups, sorts and truncates.
//! Provider failures are contained: a provider that errors or times out
//! contributes zero articles and is logged, nothing more. The aggregate call
//! itself fails only for precondition violations (no providers registered,
//! invalid caller input).

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;

use crate::merge::merge_articles;
use crate::model::{
    AggregateResponse, Article, HeadlinesQuery, NewsQuery, QueryMode, SearchQuery,
};
use crate::ports::{FetchError, NewsProvider};

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Aggregate-level error: configuration or caller-input problems only.
///
/// Individual provider failures never surface here; partial-source
/// degradation is the expected steady state and is invisible to the caller
/// beyond a shorter article list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("no news providers are registered")]
    NoProviders,
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Orchestrator over the registered provider set.
///
/// Built once at startup and shared across requests; holds no per-request
/// mutable state.
pub struct Aggregator {
    providers: Vec<Arc<dyn NewsProvider>>,
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn NewsProvider>>) -> Self {
        Self { providers }
    }

    /// Registered provider ids, in registration order.
    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Dispatch the single-call upstream contract.
    pub async fn execute(&self, query: &NewsQuery) -> Result<AggregateResponse, AggregateError> {
        match query.mode {
            QueryMode::TopHeadlines => {
                self.top_headlines(&HeadlinesQuery {
                    category: query.category,
                    country: query.country.clone(),
                    language: query.language.clone(),
                    page_size: query.page_size,
                })
                .await
            }
            QueryMode::Search => {
                self.search(&SearchQuery {
                    query: query.query_text.clone(),
                    category: query.category,
                    language: query.language.clone(),
                    page_size: query.page_size,
                })
                .await
            }
        }
    }

    /// Fetch top headlines from every provider and merge the results.
    pub async fn top_headlines(
        &self,
        query: &HeadlinesQuery,
    ) -> Result<AggregateResponse, AggregateError> {
        self.validate(query.page_size)?;

        let merged = self
            .fan_out(|provider| Box::pin(provider.top_headlines(query)))
            .await;

        Ok(self.finish(merged, query.page_size))
    }

    /// Search every provider for a keyword and merge the results.
    pub async fn search(&self, query: &SearchQuery) -> Result<AggregateResponse, AggregateError> {
        self.validate(query.page_size)?;
        if query.query.trim().is_empty() {
            return Err(AggregateError::InvalidQuery(
                "search query text must not be empty".to_string(),
            ));
        }

        let merged = self
            .fan_out(|provider| Box::pin(provider.search(query)))
            .await;

        Ok(self.finish(merged, query.page_size))
    }

    fn validate(&self, page_size: usize) -> Result<(), AggregateError> {
        if self.providers.is_empty() {
            return Err(AggregateError::NoProviders);
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(AggregateError::InvalidQuery(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        Ok(())
    }

    /// Run one operation per provider concurrently and concatenate the
    /// successful article lists in completion order. Completion order is
    /// non-deterministic run-to-run; the merge pipeline makes the final
    /// result deterministic for distinct sort keys.
    async fn fan_out<'a, F>(&'a self, op: F) -> Vec<Article>
    where
        F: Fn(&'a dyn NewsProvider) -> BoxFuture<'a, Result<Vec<Article>, FetchError>>,
    {
        let mut tasks: FuturesUnordered<BoxFuture<'a, (&'static str, Result<Vec<Article>, FetchError>)>> =
            self.providers
                .iter()
                .map(|provider| {
                    let fetch = op(provider.as_ref());
                    let id = provider.id();
                    Box::pin(async move { (id, fetch.await) }) as BoxFuture<'a, _>
                })
                .collect();

        let mut merged = Vec::new();
        while let Some((provider, outcome)) = tasks.next().await {
            match outcome {
                Ok(articles) => {
                    tracing::info!(provider, count = articles.len(), "Provider returned articles");
                    merged.extend(articles);
                }
                Err(error) => {
                    tracing::warn!(provider, error = %error, "Provider fetch failed");
                }
            }
        }
        merged
    }

    fn finish(&self, merged: Vec<Article>, page_size: usize) -> AggregateResponse {
        let articles = merge_articles(merged, page_size);
        tracing::info!(
            total = articles.len(),
            sources = self.providers.len(),
            "Aggregated unique articles"
        );
        AggregateResponse {
            total_results: articles.len(),
            sources_used: self.providers.len(),
            articles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Scripted provider used to exercise the orchestration paths.
    struct ScriptedProvider {
        id: &'static str,
        articles: Vec<Article>,
        fail: bool,
        delay: Option<Duration>,
    }

    impl ScriptedProvider {
        fn ok(id: &'static str, articles: Vec<Article>) -> Arc<dyn NewsProvider> {
            Arc::new(Self {
                id,
                articles,
                fail: false,
                delay: None,
            })
        }

        fn failing(id: &'static str) -> Arc<dyn NewsProvider> {
            Arc::new(Self {
                id,
                articles: Vec::new(),
                fail: true,
                delay: None,
            })
        }

        fn slow(id: &'static str, articles: Vec<Article>, delay: Duration) -> Arc<dyn NewsProvider> {
            Arc::new(Self {
                id,
                articles,
                fail: false,
                delay: Some(delay),
            })
        }

        async fn respond(&self) -> Result<Vec<Article>, FetchError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(FetchError::Timeout);
            }
            Ok(self.articles.clone())
        }
    }

    #[async_trait]
    impl NewsProvider for ScriptedProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn top_headlines(&self, _query: &HeadlinesQuery) -> Result<Vec<Article>, FetchError> {
            self.respond().await
        }

        async fn search(&self, _query: &SearchQuery) -> Result<Vec<Article>, FetchError> {
            self.respond().await
        }
    }

    fn article(title: &str, published_at: &str, provider_id: &str) -> Article {
        Article {
            title: title.to_string(),
            url: format!("https://example.com/{}", title.replace(' ', "-")),
            published_at: published_at.to_string(),
            provider_id: provider_id.to_string(),
            ..Article::default()
        }
    }

    #[tokio::test]
    async fn zero_providers_is_an_aggregate_error() {
        let aggregator = Aggregator::new(vec![]);

        let result = aggregator.top_headlines(&HeadlinesQuery::default()).await;

        assert_eq!(result.unwrap_err(), AggregateError::NoProviders);
    }

    #[tokio::test]
    async fn blank_search_query_is_rejected() {
        let aggregator = Aggregator::new(vec![ScriptedProvider::ok("a", vec![])]);

        let result = aggregator.search(&SearchQuery::new("   ")).await;

        assert!(matches!(result, Err(AggregateError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn out_of_range_page_size_is_rejected() {
        let aggregator = Aggregator::new(vec![ScriptedProvider::ok("a", vec![])]);

        for page_size in [0, 101] {
            let query = HeadlinesQuery {
                page_size,
                ..HeadlinesQuery::default()
            };
            let result = aggregator.top_headlines(&query).await;
            assert!(matches!(result, Err(AggregateError::InvalidQuery(_))));
        }
    }

    #[tokio::test]
    async fn one_failing_provider_does_not_fail_the_aggregate() {
        let aggregator = Aggregator::new(vec![
            ScriptedProvider::ok("healthy", vec![article("Story", "2024-01-01T00:00:00Z", "healthy")]),
            ScriptedProvider::failing("broken"),
        ]);

        let response = aggregator
            .top_headlines(&HeadlinesQuery::default())
            .await
            .expect("aggregate must stay ok");

        assert_eq!(response.articles.len(), 1);
        assert_eq!(response.sources_used, 2);
    }

    #[tokio::test]
    async fn all_providers_failing_is_a_valid_empty_outcome() {
        let aggregator = Aggregator::new(vec![
            ScriptedProvider::failing("a"),
            ScriptedProvider::failing("b"),
        ]);

        let response = aggregator
            .top_headlines(&HeadlinesQuery::default())
            .await
            .expect("aggregate must stay ok");

        assert!(response.articles.is_empty());
        assert_eq!(response.total_results, 0);
        assert_eq!(response.sources_used, 2);
    }

    #[tokio::test]
    async fn case_and_whitespace_title_variants_collapse_to_one() {
        let aggregator = Aggregator::new(vec![
            ScriptedProvider::ok(
                "first",
                vec![article("Budget 2024 announced", "2024-02-01T08:00:00Z", "first")],
            ),
            ScriptedProvider::ok(
                "second",
                vec![article("  BUDGET 2024 ANNOUNCED ", "2024-02-01T09:00:00Z", "second")],
            ),
        ]);

        let response = aggregator
            .top_headlines(&HeadlinesQuery::default())
            .await
            .expect("aggregate must stay ok");

        assert_eq!(response.articles.len(), 1);
        assert_eq!(
            response.articles[0].title.trim().to_lowercase(),
            "budget 2024 announced"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn three_timeouts_and_four_healthy_providers_yield_twenty_articles() {
        let mut providers: Vec<Arc<dyn NewsProvider>> = (0..3)
            .map(|i| {
                ScriptedProvider::failing(["t0", "t1", "t2"][i])
            })
            .collect();
        for (index, id) in ["h0", "h1", "h2", "h3"].into_iter().enumerate() {
            let articles = (0..5)
                .map(|n| {
                    article(
                        &format!("{id} story {n}"),
                        &format!("2024-03-{:02}T00:00:00Z", index * 5 + n + 1),
                        id,
                    )
                })
                .collect();
            providers.push(ScriptedProvider::slow(
                id,
                articles,
                Duration::from_millis(50 * (index as u64 + 1)),
            ));
        }
        let aggregator = Aggregator::new(providers);

        let response = aggregator
            .top_headlines(&HeadlinesQuery::default())
            .await
            .expect("aggregate must stay ok");

        assert_eq!(response.articles.len(), 20);
        assert_eq!(response.total_results, 20);
        assert_eq!(response.sources_used, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn completion_order_does_not_affect_the_merged_result() {
        let fast_first = Aggregator::new(vec![
            ScriptedProvider::ok("fast", vec![article("Alpha", "2024-01-02T00:00:00Z", "fast")]),
            ScriptedProvider::slow(
                "slow",
                vec![article("Beta", "2024-01-01T00:00:00Z", "slow")],
                Duration::from_millis(20),
            ),
        ]);
        let slow_first = Aggregator::new(vec![
            ScriptedProvider::slow(
                "slow",
                vec![article("Beta", "2024-01-01T00:00:00Z", "slow")],
                Duration::from_millis(20),
            ),
            ScriptedProvider::ok("fast", vec![article("Alpha", "2024-01-02T00:00:00Z", "fast")]),
        ]);

        let query = HeadlinesQuery::default();
        let a = fast_first.top_headlines(&query).await.expect("ok");
        let b = slow_first.top_headlines(&query).await.expect("ok");

        assert_eq!(a.articles, b.articles);
        assert_eq!(a.articles[0].title, "Alpha");
    }

    #[tokio::test]
    async fn execute_dispatches_on_query_mode() {
        let aggregator = Aggregator::new(vec![ScriptedProvider::ok(
            "a",
            vec![article("Story", "2024-01-01T00:00:00Z", "a")],
        )]);

        let headlines = aggregator.execute(&NewsQuery::default()).await.expect("ok");
        assert_eq!(headlines.total_results, 1);

        let search = aggregator
            .execute(&NewsQuery {
                mode: QueryMode::Search,
                query_text: "story".to_string(),
                ..NewsQuery::default()
            })
            .await
            .expect("ok");
        assert_eq!(search.total_results, 1);

        let invalid = aggregator
            .execute(&NewsQuery {
                mode: QueryMode::Search,
                ..NewsQuery::default()
            })
            .await;
        assert!(matches!(invalid, Err(AggregateError::InvalidQuery(_))));
    }
}
