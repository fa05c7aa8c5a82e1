//! Pure merge pipeline: deduplication, recency ordering, truncation
//!
//! These functions are stateless with respect to the rest of the system and
//! deliberately simple. The dedup key is an exact normalized title and the
//! sort compares timestamp strings lexically; neither attempts fuzzy matching
//! or timestamp parsing. Two distinct stories sharing a headline collide, and
//! providers using differing date formats do not interleave correctly. Both
//! are accepted trade-offs inherited from the aggregate contract, not bugs.

use std::collections::HashSet;

use crate::model::Article;

/// Remove duplicate articles, first-seen order preserved.
///
/// Key = title, lower-cased and trimmed. Articles with a blank normalized
/// title are always retained: an empty title is never treated as a duplicate
/// of another empty title.
pub fn dedup_articles(articles: Vec<Article>) -> Vec<Article> {
    let mut seen_titles = HashSet::new();
    let mut unique = Vec::with_capacity(articles.len());

    for article in articles {
        let key = article.title.trim().to_lowercase();
        if key.is_empty() || seen_titles.insert(key) {
            unique.push(article);
        }
    }

    unique
}

/// Stable sort by `published_at`, most recent first.
///
/// The field is compared as an opaque string; empty timestamps sort last.
pub fn sort_by_recency(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Dedup, sort and cap a merged article list to `page_size` entries.
pub fn merge_articles(articles: Vec<Article>, page_size: usize) -> Vec<Article> {
    let mut unique = dedup_articles(articles);
    sort_by_recency(&mut unique);
    unique.truncate(page_size);
    unique
}
