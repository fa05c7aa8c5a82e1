//! GNews provider adapter
//!
//! GNews responses carry no status field; success is signalled by the
//! presence of the `articles` key.

use async_trait::async_trait;
use reqwest::Client;
use samachar_domain::{Article, Category, FetchError, HeadlinesQuery, NewsProvider, SearchQuery};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::http;

const PROVIDER_ID: &str = "gnews";
const MAX_PAGE_SIZE: usize = 100;

pub struct GnewsProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl GnewsProvider {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_base_url(api_key, "https://gnews.io/api/v4".to_string())
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
    ) -> Result<Vec<Article>, FetchError> {
        params.push(("apikey", self.api_key.expose_secret().to_string()));

        let url = format!("{}/{}", self.base_url, endpoint);
        let response: GnewsResponse = http::get_json(&self.client, &url, &params).await?;

        match response.articles {
            Some(articles) => Ok(articles.into_iter().map(normalize).collect()),
            None => Err(FetchError::Payload(
                "GNews response has no articles key".to_string(),
            )),
        }
    }
}

fn topic_for(category: Category) -> Option<&'static str> {
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
impl NewsProvider for GnewsProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![
            ("lang", query.language.clone()),
            ("max", query.page_size.min(MAX_PAGE_SIZE).to_string()),
        ];
        if let Some(topic) = query.category.and_then(topic_for) {
            params.push(("topic", topic.to_string()));
        }
        if !query.country.is_empty() {
            params.push(("country", query.country.clone()));
        }

        self.fetch("top-headlines", params).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![
            ("q", query.query.clone()),
            ("lang", query.language.clone()),
            ("max", query.page_size.min(MAX_PAGE_SIZE).to_string()),
            ("sortby", "publishedAt".to_string()),
        ];
        if let Some(topic) = query.category.and_then(topic_for) {
            params.push(("topic", topic.to_string()));
        }

        self.fetch("search", params).await
    }
}

#[derive(Debug, Deserialize)]
struct GnewsResponse {
    articles: Option<Vec<RawArticle>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    image: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<RawSource>,
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSource {
    name: Option<String>,
}

/// GNews exposes no byline at all, so the author is always empty.
fn normalize(raw: RawArticle) -> Article {
    Article {
        title: raw.title.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        url: raw.url.unwrap_or_default(),
        image_url: raw.image.unwrap_or_default(),
        published_at: raw.published_at.unwrap_or_default(),
        source_name: raw.source.and_then(|s| s.name).unwrap_or_default(),
        content: raw.content.unwrap_or_default(),
        author: String::new(),
        provider_id: PROVIDER_ID.to_string(),
    }
}
