//! Domain models and value objects

use serde::{Deserialize, Serialize};

/// A canonical news article, the unit the whole pipeline operates on.
///
/// Every field is a plain `String` that defaults to empty rather than being
/// absent: providers that omit a field normalize it to `""`. Articles are
/// immutable once constructed by their adapter; the aggregator only filters,
/// reorders and truncates collections of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Headline; deduplication key after lower-casing and trimming
    pub title: String,
    /// Short summary or teaser text
    pub description: String,
    /// Permalink to the article
    pub url: String,
    /// Preview image URL, empty if the provider supplied none
    pub image_url: String,
    /// Publication timestamp as supplied by the provider. Kept as an opaque
    /// string: providers disagree on format and timezone, so ordering is a
    /// best-effort lexical comparison, not guaranteed chronology.
    pub published_at: String,
    /// Human-readable publisher name
    pub source_name: String,
    /// Best-available body excerpt (may duplicate the description)
    pub content: String,
    /// Byline, empty when unknown
    pub author: String,
    /// Which adapter produced this record; diagnostics only, never used for
    /// dedup or sorting
    pub provider_id: String,
}

/// Canonical news category vocabulary.
///
/// Each provider translates these into its own section/topic tokens via a
/// fixed per-adapter map; an unmapped category means the filter is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Business,
    Technology,
    Sports,
    Entertainment,
    Science,
    World,
    India,
    Health,
    Other,
}

impl Category {
    /// Canonical lower-case token for this category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Technology => "technology",
            Self::Sports => "sports",
            Self::Entertainment => "entertainment",
            Self::Science => "science",
            Self::World => "world",
            Self::India => "india",
            Self::Health => "health",
            Self::Other => "other",
        }
    }

    /// Parse a category token case-insensitively; unknown tokens map to
    /// `Other` rather than failing.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "business" => Self::Business,
            "technology" => Self::Technology,
            "sports" => Self::Sports,
            "entertainment" => Self::Entertainment,
            "science" => Self::Science,
            "world" => Self::World,
            "india" => Self::India,
            "health" => Self::Health,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters for a top-headlines fetch.
#[derive(Debug, Clone)]
pub struct HeadlinesQuery {
    pub category: Option<Category>,
    /// ISO 3166 country code, may be empty to skip country filtering
    pub country: String,
    pub language: String,
    pub page_size: usize,
}

impl Default for HeadlinesQuery {
    fn default() -> Self {
        Self {
            category: None,
            country: "in".to_string(),
            language: "en".to_string(),
            page_size: 100,
        }
    }
}

/// Query parameters for a keyword search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub category: Option<Category>,
    pub language: String,
    pub page_size: usize,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: None,
            language: "en".to_string(),
            page_size: 100,
        }
    }
}

/// Operation selector for the single-call upstream contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    TopHeadlines,
    Search,
}

/// The single-call query descriptor consumed by upstream collaborators.
///
/// Constructed per request and discarded after use; `query_text` is only
/// meaningful in `Search` mode.
#[derive(Debug, Clone)]
pub struct NewsQuery {
    pub mode: QueryMode,
    pub category: Option<Category>,
    pub query_text: String,
    pub country: String,
    pub language: String,
    pub page_size: usize,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            mode: QueryMode::TopHeadlines,
            category: None,
            query_text: String::new(),
            country: "in".to_string(),
            language: "en".to_string(),
            page_size: 100,
        }
    }
}

/// Aggregated result returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResponse {
    /// Deduplicated, recency-sorted, truncated articles
    pub articles: Vec<Article>,
    /// Number of articles in `articles`
    pub total_results: usize,
    /// Number of registered providers the query fanned out to, regardless of
    /// how many of them succeeded
    pub sources_used: usize,
}
