use async_trait::async_trait;
use crate::types::{ArticleRecord, NewsItem};
use crate::Result;

#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Insert the records that are not already stored, deduplicating by
    /// exact URL. The whole batch commits or rolls back as one transaction.
    /// Returns the number of rows actually inserted.
    async fn insert_new(&self, records: &[ArticleRecord]) -> Result<u64>;

    /// Stored items ordered by `published_at` descending.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<NewsItem>>;

    /// Single item by id, `None` when absent.
    async fn get(&self, id: i64) -> Result<Option<NewsItem>>;

    /// Total number of stored items.
    async fn count(&self) -> Result<u64>;

    /// Most recently inserted items, newest id first.
    async fn recent(&self, limit: i64) -> Result<Vec<NewsItem>>;
}
