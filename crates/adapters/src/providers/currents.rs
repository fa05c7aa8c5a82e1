//! Currents API provider adapter

use async_trait::async_trait;
use reqwest::Client;
use samachar_domain::{Article, Category, FetchError, HeadlinesQuery, NewsProvider, SearchQuery};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::http;

const PROVIDER_ID: &str = "currents";

pub struct CurrentsProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl CurrentsProvider {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_base_url(api_key, "https://api.currentsapi.services/v1".to_string())
    }

    pub fn with_base_url(api_key: SecretString, base_url: String) -> Self {
        Self {
            client: http::build_client(),
            api_key,
            base_url,
        }
    }

    async fn fetch(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
        page_size: usize,
    ) -> Result<Vec<Article>, FetchError> {
        params.push(("apiKey", self.api_key.expose_secret().to_string()));

        let url = format!("{}/{}", self.base_url, endpoint);
        let response: CurrentsResponse = http::get_json(&self.client, &url, &params).await?;

        if response.status != "ok" {
            return Err(FetchError::Payload(format!(
                "Currents status '{}'",
                response.status
            )));
        }

        Ok(response
            .news
            .into_iter()
            .take(page_size)
            .map(normalize)
            .collect())
    }
}

/// Currents files regional coverage under its own "regional" category.
fn category_token(category: Category) -> Option<&'static str> {
    match category {
        Category::Business => Some("business"),
        Category::Technology => Some("technology"),
        Category::Sports => Some("sports"),
        Category::Entertainment => Some("entertainment"),
        Category::Science => Some("science"),
        Category::World => Some("world"),
        Category::India => Some("regional"),
        Category::Health | Category::Other => None,
    }
}

#[async_trait]
impl NewsProvider for CurrentsProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![("language", query.language.clone())];
        if let Some(token) = query.category.and_then(category_token) {
            params.push(("category", token.to_string()));
        }
        if !query.country.is_empty() {
            params.push(("country", query.country.clone()));
        }

        self.fetch("latest-news", params, query.page_size).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![
            ("keywords", query.query.clone()),
            ("language", query.language.clone()),
        ];
        if let Some(token) = query.category.and_then(category_token) {
            params.push(("category", token.to_string()));
        }

        self.fetch("search", params, query.page_size).await
    }
}

#[derive(Debug, Deserialize)]
struct CurrentsResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    news: Vec<RawNews>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNews {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    image: Option<String>,
    published: Option<String>,
    author: Option<String>,
}

/// Currents has no separate publisher field; the author doubles as the
/// source name, and the description doubles as the body excerpt.
fn normalize(raw: RawNews) -> Article {
    let description = raw.description.unwrap_or_default();
    let author = raw.author.unwrap_or_default();
    Article {
        title: raw.title.unwrap_or_default(),
        description: description.clone(),
        url: raw.url.unwrap_or_default(),
        image_url: raw.image.unwrap_or_default(),
        published_at: raw.published.unwrap_or_default(),
        source_name: author.clone(),
        content: description,
        author,
        provider_id: PROVIDER_ID.to_string(),
    }
}
