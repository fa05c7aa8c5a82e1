//! The Guardian provider adapter
//!
//! Both operations go through `/search`. The Guardian caps page sizes at 50,
//! below the common 100-item ceiling, so requests are clamped down.

use async_trait::async_trait;
use reqwest::Client;
use samachar_domain::{Article, Category, FetchError, HeadlinesQuery, NewsProvider, SearchQuery};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::http;

const PROVIDER_ID: &str = "guardian";
const MAX_PAGE_SIZE: usize = 50;
const SHOW_FIELDS: &str = "thumbnail,trailText,byline";

pub struct GuardianProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl GuardianProvider {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_base_url(api_key, "https://content.guardianapis.com".to_string())
    }

    pub fn with_base_url(api_key: SecretString, base_url: String) -> Self {
        Self {
            client: http::build_client(),
            api_key,
            base_url,
        }
    }

    async fn fetch(&self, mut params: Vec<(&'static str, String)>) -> Result<Vec<Article>, FetchError> {
        params.push(("api-key", self.api_key.expose_secret().to_string()));
        params.push(("show-fields", SHOW_FIELDS.to_string()));

        let response: GuardianEnvelope =
            http::get_json(&self.client, &format!("{}/search", self.base_url), &params).await?;

        if response.response.status != "ok" {
            return Err(FetchError::Payload(format!(
                "Guardian status '{}'",
                response.response.status
            )));
        }

        Ok(response.response.results.into_iter().map(normalize).collect())
    }
}

/// Guardian sections for the canonical categories; note "culture" for
/// entertainment and the singular "sport".
fn section_for(category: Category) -> Option<&'static str> {
    match category {
        Category::Business => Some("business"),
        Category::Technology => Some("technology"),
        Category::Sports => Some("sport"),
        Category::Entertainment => Some("culture"),
        Category::Science => Some("science"),
        Category::World => Some("world"),
        Category::India => Some("world/india"),
        Category::Health | Category::Other => None,
    }
}

#[async_trait]
impl NewsProvider for GuardianProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![
            ("page-size", query.page_size.min(MAX_PAGE_SIZE).to_string()),
            ("order-by", "newest".to_string()),
        ];

        if let Some(section) = query.category.and_then(section_for) {
            params.push(("section", section.to_string()));
        } else if query.country == "in" {
            params.push(("section", "world/india".to_string()));
        }

        self.fetch(params).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![
            ("q", query.query.clone()),
            ("page-size", query.page_size.min(MAX_PAGE_SIZE).to_string()),
            ("order-by", "relevance".to_string()),
        ];

        if let Some(section) = query.category.and_then(section_for) {
            params.push(("section", section.to_string()));
        }

        self.fetch(params).await
    }
}

#[derive(Debug, Deserialize)]
struct GuardianEnvelope {
    #[serde(default)]
    response: GuardianBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GuardianBody {
    status: String,
    results: Vec<RawResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResult {
    #[serde(rename = "webTitle")]
    web_title: Option<String>,
    #[serde(rename = "webUrl")]
    web_url: Option<String>,
    #[serde(rename = "webPublicationDate")]
    web_publication_date: Option<String>,
    fields: Option<RawFields>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFields {
    thumbnail: Option<String>,
    #[serde(rename = "trailText")]
    trail_text: Option<String>,
    byline: Option<String>,
}

fn normalize(raw: RawResult) -> Article {
    let fields = raw.fields.unwrap_or_default();
    let trail_text = fields.trail_text.unwrap_or_default();
    Article {
        title: raw.web_title.unwrap_or_default(),
        description: trail_text.clone(),
        url: raw.web_url.unwrap_or_default(),
        image_url: fields.thumbnail.unwrap_or_default(),
        published_at: raw.web_publication_date.unwrap_or_default(),
        source_name: "The Guardian".to_string(),
        content: trail_text,
        author: fields.byline.unwrap_or_default(),
        provider_id: PROVIDER_ID.to_string(),
    }
}
