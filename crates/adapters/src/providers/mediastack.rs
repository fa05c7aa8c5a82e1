//! MediaStack provider adapter
//!
//! A single `/news` endpoint serves both operations; the free tier is plain
//! HTTP only. Success is signalled by the presence of the `data` key.

use async_trait::async_trait;
use reqwest::Client;
use samachar_domain::{Article, Category, FetchError, HeadlinesQuery, NewsProvider, SearchQuery};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::http;

const PROVIDER_ID: &str = "mediastack";
const MAX_PAGE_SIZE: usize = 100;

pub struct MediaStackProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl MediaStackProvider {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_base_url(api_key, "http://api.mediastack.com/v1".to_string())
    }

    pub fn with_base_url(api_key: SecretString, base_url: String) -> Self {
        Self {
            client: http::build_client(),
            api_key,
            base_url,
        }
    }

    async fn fetch(&self, mut params: Vec<(&'static str, String)>) -> Result<Vec<Article>, FetchError> {
        params.push(("access_key", self.api_key.expose_secret().to_string()));

        let url = format!("{}/news", self.base_url);
        let response: MediaStackResponse = http::get_json(&self.client, &url, &params).await?;

        match response.data {
            Some(items) => Ok(items.into_iter().map(normalize).collect()),
            None => Err(FetchError::Payload(
                "MediaStack response has no data key".to_string(),
            )),
        }
    }
}

/// MediaStack has no world or regional categories.
fn category_token(category: Category) -> Option<&'static str> {
    match category {
        Category::Business => Some("business"),
        Category::Technology => Some("technology"),
        Category::Sports => Some("sports"),
        Category::Entertainment => Some("entertainment"),
        Category::Science => Some("science"),
        Category::Health => Some("health"),
        Category::World | Category::India | Category::Other => None,
    }
}

#[async_trait]
impl NewsProvider for MediaStackProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![
            ("languages", query.language.clone()),
            ("limit", query.page_size.min(MAX_PAGE_SIZE).to_string()),
            ("sort", "published_desc".to_string()),
        ];
        if let Some(token) = query.category.and_then(category_token) {
            params.push(("categories", token.to_string()));
        }
        if !query.country.is_empty() {
            params.push(("countries", query.country.clone()));
        }

        self.fetch(params).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![
            ("keywords", query.query.clone()),
            ("languages", query.language.clone()),
            ("limit", query.page_size.min(MAX_PAGE_SIZE).to_string()),
            ("sort", "published_desc".to_string()),
        ];
        if let Some(token) = query.category.and_then(category_token) {
            params.push(("categories", token.to_string()));
        }

        self.fetch(params).await
    }
}

#[derive(Debug, Deserialize)]
struct MediaStackResponse {
    data: Option<Vec<RawItem>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawItem {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    image: Option<String>,
    published_at: Option<String>,
    /// Flat publisher string, unlike the nested objects other providers use
    source: Option<String>,
    author: Option<String>,
}

fn normalize(raw: RawItem) -> Article {
    let description = raw.description.unwrap_or_default();
    Article {
        title: raw.title.unwrap_or_default(),
        description: description.clone(),
        url: raw.url.unwrap_or_default(),
        image_url: raw.image.unwrap_or_default(),
        published_at: raw.published_at.unwrap_or_default(),
        source_name: raw.source.unwrap_or_default(),
        content: description,
        author: raw.author.unwrap_or_default(),
        provider_id: PROVIDER_ID.to_string(),
    }
}
