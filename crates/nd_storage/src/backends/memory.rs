use async_trait::async_trait;
use chrono::Utc;
use nd_core::{ArticleRecord, Error, NewsItem, NewsStore, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    items: Vec<NewsItem>,
    next_id: i64,
}

/// In-memory store with the same batch semantics as the SQLite backend.
/// Used by tests and as a throwaway backend for local runs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn insert_new(&self, records: &[ArticleRecord]) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let mut staged: Vec<NewsItem> = Vec::new();

        for record in records {
            if record.title.is_empty() {
                // Mirrors the SQLite CHECK constraint: abandon the batch.
                return Err(Error::Storage("empty title".to_string()));
            }
            let duplicate = inner.items.iter().any(|i| i.url == record.url)
                || staged.iter().any(|i| i.url == record.url);
            if duplicate {
                continue;
            }
            inner.next_id += 1;
            staged.push(NewsItem {
                id: inner.next_id,
                title: record.title.clone(),
                summary: record.summary.clone(),
                url: record.url.clone(),
                image_url: record.image_url.clone(),
                source: record.source.clone(),
                published_at: record.published_at,
                created_at: Utc::now(),
            });
        }

        let inserted = staged.len() as u64;
        inner.items.extend(staged);
        Ok(inserted)
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<NewsItem>> {
        let inner = self.inner.read().await;
        let mut items = inner.items.clone();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(items
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Option<NewsItem>> {
        let inner = self.inner.read().await;
        Ok(inner.items.iter().find(|i| i.id == id).cloned())
    }

    async fn count(&self) -> Result<u64> {
        let inner = self.inner.read().await;
        Ok(inner.items.len() as u64)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<NewsItem>> {
        let inner = self.inner.read().await;
        let mut items = inner.items.clone();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(items.into_iter().take(limit.max(0) as usize).collect())
    }
}
