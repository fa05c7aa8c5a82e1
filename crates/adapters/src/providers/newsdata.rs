//! NewsData.io provider adapter

use async_trait::async_trait;
use reqwest::Client;
use samachar_domain::{Article, Category, FetchError, HeadlinesQuery, NewsProvider, SearchQuery};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::http;

const PROVIDER_ID: &str = "newsdata";

pub struct NewsDataProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl NewsDataProvider {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_base_url(api_key, "https://newsdata.io/api/1".to_string())
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
        mut params: Vec<(&'static str, String)>,
        page_size: usize,
    ) -> Result<Vec<Article>, FetchError> {
        params.push(("apikey", self.api_key.expose_secret().to_string()));

        let url = format!("{}/news", self.base_url);
        let response: NewsDataResponse = http::get_json(&self.client, &url, &params).await?;

        if response.status != "success" {
            return Err(FetchError::Payload(format!(
                "NewsData status '{}'",
                response.status
            )));
        }

        Ok(response
            .results
            .into_iter()
            .take(page_size)
            .map(normalize)
            .collect())
    }
}

fn category_token(category: Category) -> Option<&'static str> {
    match category {
        Category::Business => Some("business"),
        Category::Technology => Some("technology"),
        Category::Sports => Some("sports"),
        Category::Entertainment => Some("entertainment"),
        Category::Science => Some("science"),
        Category::World => Some("world"),
        Category::Health => Some("health"),
        Category::India | Category::Other => None,
    }
}

#[async_trait]
impl NewsProvider for NewsDataProvider {
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

        self.fetch(params, query.page_size).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![
            ("q", query.query.clone()),
            ("language", query.language.clone()),
        ];
        if let Some(token) = query.category.and_then(category_token) {
            params.push(("category", token.to_string()));
        }

        self.fetch(params, query.page_size).await
    }
}

#[derive(Debug, Deserialize)]
struct NewsDataResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResult {
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
    image_url: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source_id: Option<String>,
    content: Option<String>,
    /// NewsData reports bylines as a list; the first entry wins
    creator: Option<Vec<String>>,
}

fn normalize(raw: RawResult) -> Article {
    Article {
        title: raw.title.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        url: raw.link.unwrap_or_default(),
        image_url: raw.image_url.unwrap_or_default(),
        published_at: raw.pub_date.unwrap_or_default(),
        source_name: raw.source_id.unwrap_or_default(),
        content: raw.content.unwrap_or_default(),
        author: raw
            .creator
            .and_then(|mut creators| {
                if creators.is_empty() {
                    None
                } else {
                    Some(creators.remove(0))
                }
            })
            .unwrap_or_default(),
        provider_id: PROVIDER_ID.to_string(),
    }
}
