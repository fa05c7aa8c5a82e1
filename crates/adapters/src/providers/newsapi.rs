//! NewsAPI.org provider adapter
//!
//! The free tier has no reliable country+category top-headlines endpoint, so
//! headline requests are rewritten into `/everything` searches with a
//! synthesized keyword query, sorted by publish time.

use async_trait::async_trait;
use reqwest::Client;
use samachar_domain::{Article, Category, FetchError, HeadlinesQuery, NewsProvider, SearchQuery};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::http;

const PROVIDER_ID: &str = "newsapi";
const MAX_PAGE_SIZE: usize = 100;

pub struct NewsApiProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl NewsApiProvider {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_base_url(api_key, "https://newsapi.org/v2".to_string())
    }

    pub fn with_base_url(api_key: SecretString, base_url: String) -> Self {
        Self {
            client: http::build_client(),
            api_key,
            base_url,
        }
    }

    async fn fetch_everything(&self, query_text: String, language: &str, page_size: usize) -> Result<Vec<Article>, FetchError> {
        let params = [
            ("apiKey", self.api_key.expose_secret().to_string()),
            ("q", query_text),
            ("language", language.to_string()),
            ("pageSize", page_size.min(MAX_PAGE_SIZE).to_string()),
            ("sortBy", "publishedAt".to_string()),
        ];

        let response: NewsApiResponse =
            http::get_json(&self.client, &format!("{}/everything", self.base_url), &params).await?;

        if response.status != "ok" {
            return Err(FetchError::Payload(format!(
                "NewsAPI status '{}': {}",
                response.status,
                response.message.unwrap_or_default()
            )));
        }

        Ok(response.articles.into_iter().map(normalize).collect())
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<Vec<Article>, FetchError> {
        // Synthesize a search query from the category; regional requests and
        // uncategorized ones fall back to the locale keyword alone.
        let query_text = match query.category {
            Some(category) if category != Category::India => {
                if query.country == "in" {
                    format!("{} india", category.as_str())
                } else {
                    category.as_str().to_string()
                }
            }
            _ => "india".to_string(),
        };

        self.fetch_everything(query_text, &query.language, query.page_size)
            .await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, FetchError> {
        let query_text = match query.category {
            Some(category) if !matches!(category, Category::India | Category::World) => {
                format!("{} {}", query.query, category.as_str())
            }
            _ => query.query.clone(),
        };

        self.fetch_everything(query_text, &query.language, query.page_size)
            .await
    }
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

/// NewsAPI uses JSON null for absent fields, hence `Option` throughout.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<RawSource>,
    content: Option<String>,
    author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSource {
    name: Option<String>,
}

fn normalize(raw: RawArticle) -> Article {
    Article {
        title: raw.title.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        url: raw.url.unwrap_or_default(),
        image_url: raw.url_to_image.unwrap_or_default(),
        published_at: raw.published_at.unwrap_or_default(),
        source_name: raw.source.and_then(|s| s.name).unwrap_or_default(),
        content: raw.content.unwrap_or_default(),
        author: raw.author.unwrap_or_default(),
        provider_id: PROVIDER_ID.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> NewsApiProvider {
        NewsApiProvider::with_base_url(SecretString::new("test-key".into()), server.uri())
    }

    #[tokio::test]
    async fn headlines_are_rewritten_into_an_everything_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .and(query_param("apiKey", "test-key"))
            .and(query_param("q", "technology india"))
            .and(query_param("sortBy", "publishedAt"))
            .and(query_param("pageSize", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "articles": [{
                    "title": "Chip fab announced",
                    "description": "A new fab",
                    "url": "https://example.com/fab",
                    "urlToImage": "https://example.com/fab.jpg",
                    "publishedAt": "2024-02-01T10:00:00Z",
                    "source": {"name": "Example Wire"},
                    "content": "A new fab is coming up",
                    "author": "R. Sharma"
                }]
            })))
            .mount(&server)
            .await;

        let query = HeadlinesQuery {
            category: Some(Category::Technology),
            ..HeadlinesQuery::default()
        };
        let articles = provider(&server).top_headlines(&query).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Chip fab announced");
        assert_eq!(articles[0].source_name, "Example Wire");
        assert_eq!(articles[0].provider_id, "newsapi");
    }

    #[tokio::test]
    async fn uncategorized_headlines_query_for_the_locale_keyword() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .and(query_param("q", "india"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "articles": []
            })))
            .mount(&server)
            .await;

        let articles = provider(&server)
            .top_headlines(&HeadlinesQuery::default())
            .await
            .unwrap();

        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn search_appends_category_keyword_except_regional_and_world() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .and(query_param("q", "budget business"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "articles": []
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .and(query_param("q", "budget"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "articles": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let p = provider(&server);
        let mut query = SearchQuery::new("budget");
        query.category = Some(Category::Business);
        p.search(&query).await.unwrap();

        query.category = Some(Category::World);
        p.search(&query).await.unwrap();
    }

    #[tokio::test]
    async fn non_ok_body_status_is_a_payload_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "error",
                "message": "apiKeyInvalid"
            })))
            .mount(&server)
            .await;

        let result = provider(&server)
            .search(&SearchQuery::new("budget"))
            .await;

        assert!(matches!(result, Err(FetchError::Payload(_))));
    }

    #[tokio::test]
    async fn upstream_500_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = provider(&server)
            .search(&SearchQuery::new("budget"))
            .await;

        assert!(matches!(result, Err(FetchError::Api { status: 500, .. })));
    }

    #[test]
    fn normalize_maps_missing_fields_to_empty_strings() {
        let raw: RawArticle = serde_json::from_value(serde_json::json!({
            "title": "Only a title",
            "author": null,
            "source": null
        }))
        .unwrap();

        let article = normalize(raw);

        assert_eq!(article.title, "Only a title");
        assert_eq!(article.description, "");
        assert_eq!(article.url, "");
        assert_eq!(article.image_url, "");
        assert_eq!(article.published_at, "");
        assert_eq!(article.source_name, "");
        assert_eq!(article.content, "");
        assert_eq!(article.author, "");
        assert_eq!(article.provider_id, "newsapi");
    }
}
