use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nd_core::{ArticleRecord, NewsItem, NewsStore, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS news_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL CHECK(length(title) > 0),
        summary TEXT NOT NULL,
        url TEXT NOT NULL UNIQUE,
        image_url TEXT,
        source TEXT NOT NULL,
        published_at TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_news_items_published_at
    ON news_items(published_at)
    "#,
    // Add future migrations here
];

pub struct SqliteStore {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl SqliteStore {
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        for migration in MIGRATIONS {
            sqlx::query(migration).execute(&pool).await?;
        }

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

fn item_from_row(row: &SqliteRow) -> NewsItem {
    NewsItem {
        id: row.get("id"),
        title: row.get("title"),
        summary: row.get("summary"),
        url: row.get("url"),
        image_url: row.get("image_url"),
        source: row.get("source"),
        published_at: row.get::<DateTime<Utc>, _>("published_at"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }
}

#[async_trait]
impl NewsStore for SqliteStore {
    async fn insert_new(&self, records: &[ArticleRecord]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for record in records {
            let existing: Option<i64> =
                sqlx::query_scalar("SELECT id FROM news_items WHERE url = ?")
                    .bind(&record.url)
                    .fetch_optional(&mut *tx)
                    .await?;

            if existing.is_some() {
                debug!("already stored, skipping: {}", record.url);
                continue;
            }

            let result = sqlx::query(
                r#"
                INSERT INTO news_items
                (title, summary, url, image_url, source, published_at, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.title)
            .bind(&record.summary)
            .bind(&record.url)
            .bind(record.image_url.as_deref())
            .bind(&record.source)
            .bind(record.published_at)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await;

            match result {
                Ok(_) => inserted += 1,
                Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    // Lost a race for this URL; the row is already there.
                    debug!("duplicate url on insert, skipping: {}", record.url);
                }
                Err(e) => {
                    tx.rollback().await?;
                    return Err(e.into());
                }
            }
        }

        tx.commit().await?;

        if inserted > 0 {
            info!("saved {} new items", inserted);
        }
        Ok(inserted)
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<NewsItem>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM news_items
            ORDER BY published_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(item_from_row).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<NewsItem>> {
        let row = sqlx::query("SELECT * FROM news_items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(item_from_row))
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<NewsItem>> {
        let rows = sqlx::query("SELECT * FROM news_items ORDER BY id DESC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(item_from_row).collect())
    }
}
