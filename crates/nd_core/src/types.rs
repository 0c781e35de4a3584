use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate article as produced by the extractor. Has no identity until
/// the store inserts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub image_url: Option<String>,
    pub source: String,
    /// Extraction time, not true publication time. The listing pages do not
    /// expose the latter, and downstream ordering relies on this value.
    pub published_at: DateTime<Utc>,
}

/// A persisted news item. `url` is unique across all rows regardless of
/// source; `created_at` is set once at insert and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub image_url: Option<String>,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
