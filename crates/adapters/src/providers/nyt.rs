//! New York Times provider adapter
//!
//! Headlines come from the Top Stories API, search from the Article Search
//! API. The two endpoints return different raw shapes for the same logical
//! item; the normalizer detects which one it received by the presence of the
//! multimedia rendition listing and applies the matching field mapping.

use async_trait::async_trait;
use reqwest::Client;
use samachar_domain::{Article, Category, FetchError, HeadlinesQuery, NewsProvider, SearchQuery};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::http;

const PROVIDER_ID: &str = "nyt";
const SOURCE_NAME: &str = "New York Times";

/// Image renditions accepted from the top-stories multimedia listing, in
/// preference order.
const IMAGE_FORMATS: [&str; 2] = ["superJumbo", "mediumThreeByTwo440"];

pub struct NytProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl NytProvider {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_base_url(api_key, "https://api.nytimes.com/svc".to_string())
    }

    pub fn with_base_url(api_key: SecretString, base_url: String) -> Self {
        Self {
            client: http::build_client(),
            api_key,
            base_url,
        }
    }
}

fn section_for(category: Category) -> Option<&'static str> {
    match category {
        Category::Business => Some("business"),
        Category::Technology => Some("technology"),
        Category::Sports => Some("sports"),
        Category::Entertainment => Some("arts"),
        Category::Science => Some("science"),
        Category::World => Some("world"),
        Category::India | Category::Health | Category::Other => None,
    }
}

#[async_trait]
impl NewsProvider for NytProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<Vec<Article>, FetchError> {
        let section = query.category.and_then(section_for).unwrap_or("home");
        let url = format!("{}/topstories/v2/{}.json", self.base_url, section);
        let params = [("api-key", self.api_key.expose_secret().to_string())];

        let response: TopStoriesResponse = http::get_json(&self.client, &url, &params).await?;
        if response.status != "OK" {
            return Err(FetchError::Payload(format!(
                "NYT status '{}'",
                response.status
            )));
        }

        Ok(response
            .results
            .into_iter()
            .take(query.page_size)
            .map(normalize)
            .collect())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![
            ("api-key", self.api_key.expose_secret().to_string()),
            ("q", query.query.clone()),
            ("sort", "newest".to_string()),
        ];
        if let Some(section) = query.category.and_then(section_for) {
            params.push(("fq", format!("section_name:(\"{section}\")")));
        }

        let url = format!("{}/search/v2/articlesearch.json", self.base_url);
        let response: SearchResponse = http::get_json(&self.client, &url, &params).await?;
        if response.status != "OK" {
            return Err(FetchError::Payload(format!(
                "NYT status '{}'",
                response.status
            )));
        }

        Ok(response
            .response
            .docs
            .into_iter()
            .take(query.page_size)
            .map(normalize)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct TopStoriesResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    response: SearchBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchBody {
    docs: Vec<RawArticle>,
}

/// Union of the top-stories and search-result item shapes. `multimedia` is
/// `None` only when the key is absent entirely, which is the shape signal.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArticle {
    // Top stories shape
    title: Option<String>,
    url: Option<String>,
    published_date: Option<String>,
    // Search shape
    headline: Option<RawHeadline>,
    web_url: Option<String>,
    pub_date: Option<String>,
    lead_paragraph: Option<String>,
    // Shared
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    multimedia: Option<Vec<RawMultimedia>>,
    byline: Option<RawByline>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHeadline {
    main: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMultimedia {
    url: Option<String>,
    format: Option<String>,
}

/// Top stories carry the byline as a string, search results as an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawByline {
    Text(String),
    Structured {
        #[serde(default)]
        original: Option<String>,
    },
}

impl RawByline {
    fn into_author(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Structured { original } => original.unwrap_or_default(),
        }
    }
}

fn normalize(raw: RawArticle) -> Article {
    if raw.multimedia.is_some() {
        normalize_top_story(raw)
    } else {
        normalize_search_doc(raw)
    }
}

fn normalize_top_story(mut raw: RawArticle) -> Article {
    let image_url = raw
        .multimedia
        .take()
        .unwrap_or_default()
        .into_iter()
        .find(|media| {
            media
                .format
                .as_deref()
                .is_some_and(|format| IMAGE_FORMATS.contains(&format))
        })
        .and_then(|media| media.url)
        .unwrap_or_default();

    let abstract_text = raw.abstract_text.unwrap_or_default();
    Article {
        title: raw.title.unwrap_or_default(),
        description: abstract_text.clone(),
        url: raw.url.unwrap_or_default(),
        image_url,
        published_at: raw.published_date.unwrap_or_default(),
        source_name: SOURCE_NAME.to_string(),
        content: abstract_text,
        author: raw.byline.map(RawByline::into_author).unwrap_or_default(),
        provider_id: PROVIDER_ID.to_string(),
    }
}

fn normalize_search_doc(raw: RawArticle) -> Article {
    Article {
        title: raw.headline.and_then(|h| h.main).unwrap_or_default(),
        description: raw.abstract_text.unwrap_or_default(),
        url: raw.web_url.unwrap_or_default(),
        image_url: String::new(),
        published_at: raw.pub_date.unwrap_or_default(),
        source_name: SOURCE_NAME.to_string(),
        content: raw.lead_paragraph.unwrap_or_default(),
        author: raw.byline.map(RawByline::into_author).unwrap_or_default(),
        provider_id: PROVIDER_ID.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> NytProvider {
        NytProvider::with_base_url(SecretString::new("test-key".into()), server.uri())
    }

    #[tokio::test]
    async fn headlines_hit_the_mapped_top_stories_section() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topstories/v2/arts.json"))
            .and(query_param("api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [{
                    "title": "Gallery reopens",
                    "abstract": "After renovation",
                    "url": "https://www.nytimes.com/arts/gallery",
                    "published_date": "2024-02-01T10:00:00-05:00",
                    "byline": "By A. Critic",
                    "multimedia": [
                        {"url": "https://static01.nyt.com/thumb.jpg", "format": "thumbLarge"},
                        {"url": "https://static01.nyt.com/jumbo.jpg", "format": "superJumbo"}
                    ]
                }]
            })))
            .mount(&server)
            .await;

        let query = HeadlinesQuery {
            category: Some(Category::Entertainment),
            ..HeadlinesQuery::default()
        };
        let articles = provider(&server).top_headlines(&query).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Gallery reopens");
        assert_eq!(articles[0].image_url, "https://static01.nyt.com/jumbo.jpg");
        assert_eq!(articles[0].author, "By A. Critic");
        assert_eq!(articles[0].source_name, "New York Times");
    }

    #[tokio::test]
    async fn unmapped_category_defaults_to_the_home_section() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topstories/v2/home.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": []
            })))
            .mount(&server)
            .await;

        let query = HeadlinesQuery {
            category: Some(Category::India),
            ..HeadlinesQuery::default()
        };
        let articles = provider(&server).top_headlines(&query).await.unwrap();

        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn headlines_truncate_to_the_requested_page_size() {
        let server = MockServer::start().await;
        let results: Vec<serde_json::Value> = (0..5)
            .map(|i| {
                serde_json::json!({
                    "title": format!("Story {i}"),
                    "multimedia": []
                })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/topstories/v2/home.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": results
            })))
            .mount(&server)
            .await;

        let query = HeadlinesQuery {
            page_size: 3,
            ..HeadlinesQuery::default()
        };
        let articles = provider(&server).top_headlines(&query).await.unwrap();

        assert_eq!(articles.len(), 3);
    }

    #[tokio::test]
    async fn search_filters_by_section_and_sorts_newest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/v2/articlesearch.json"))
            .and(query_param("q", "trade"))
            .and(query_param("sort", "newest"))
            .and(query_param("fq", "section_name:(\"business\")"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "response": {
                    "docs": [{
                        "headline": {"main": "Trade pact signed"},
                        "abstract": "Two economies agree",
                        "web_url": "https://www.nytimes.com/business/trade-pact",
                        "pub_date": "2024-02-01T15:00:00+0000",
                        "lead_paragraph": "The agreement covers tariffs.",
                        "byline": {"original": "By B. Reporter"}
                    }]
                }
            })))
            .mount(&server)
            .await;

        let mut query = SearchQuery::new("trade");
        query.category = Some(Category::Business);
        let articles = provider(&server).search(&query).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Trade pact signed");
        assert_eq!(articles[0].content, "The agreement covers tariffs.");
        assert_eq!(articles[0].author, "By B. Reporter");
    }

    #[tokio::test]
    async fn non_ok_status_is_a_payload_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topstories/v2/home.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ERROR",
                "results": []
            })))
            .mount(&server)
            .await;

        let result = provider(&server)
            .top_headlines(&HeadlinesQuery::default())
            .await;

        assert!(matches!(result, Err(FetchError::Payload(_))));
    }

    #[test]
    fn normalize_detects_the_top_stories_shape_by_the_multimedia_listing() {
        let raw: RawArticle = serde_json::from_value(serde_json::json!({
            "title": "Top story",
            "multimedia": [
                {"url": "https://static01.nyt.com/m.jpg", "format": "mediumThreeByTwo440"}
            ]
        }))
        .unwrap();

        let article = normalize(raw);

        assert_eq!(article.title, "Top story");
        assert_eq!(article.image_url, "https://static01.nyt.com/m.jpg");
    }

    #[test]
    fn normalize_without_multimedia_applies_the_search_mapping() {
        let raw: RawArticle = serde_json::from_value(serde_json::json!({
            "headline": {"main": "Search hit"},
            "web_url": "https://www.nytimes.com/hit"
        }))
        .unwrap();

        let article = normalize(raw);

        assert_eq!(article.title, "Search hit");
        assert_eq!(article.url, "https://www.nytimes.com/hit");
        assert_eq!(article.image_url, "");
        assert_eq!(article.author, "");
    }

    #[test]
    fn normalize_skips_renditions_outside_the_preference_list() {
        let raw: RawArticle = serde_json::from_value(serde_json::json!({
            "title": "No usable image",
            "multimedia": [{"url": "https://static01.nyt.com/t.jpg", "format": "thumbLarge"}]
        }))
        .unwrap();

        assert_eq!(normalize(raw).image_url, "");
    }

    #[test]
    fn normalize_is_total_over_an_empty_item() {
        let raw: RawArticle = serde_json::from_value(serde_json::json!({})).unwrap();
        let article = normalize(raw);

        assert_eq!(article.title, "");
        assert_eq!(article.published_at, "");
        assert_eq!(article.source_name, "New York Times");
    }
}
