use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use nd_scrapers::Site;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::AppState;

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(paging): Query<Paging>,
) -> impl IntoResponse {
    match state.store.list(paging.skip, paging.limit).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => {
            error!("failed to list news: {}", e);
            internal_error()
        }
    }
}

pub async fn get_news_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.store.get(id).await {
        Ok(Some(item)) => Json(item).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "News item not found"})),
        )
            .into_response(),
        Err(e) => {
            error!("failed to load news item {}: {}", id, e);
            internal_error()
        }
    }
}

/// Fire-and-forget: the scrape runs in the background, the response only
/// acknowledges that it was scheduled.
pub async fn scrape_now(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        pipeline.run_all().await;
    });
    Json(json!({"message": "Scraping task started"}))
}

pub async fn scrape_site(
    State(state): State<Arc<AppState>>,
    Path(site): Path<String>,
) -> impl IntoResponse {
    let site: Site = match site.parse() {
        Ok(site) => site,
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Unknown site"})),
            )
                .into_response()
        }
    };

    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        pipeline.run(site).await;
    });
    Json(json!({"message": format!("Scraping task started for {}", site)})).into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "Internal server error"})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nd_core::{ArticleRecord, NewsStore};
    use nd_scrapers::Pipeline;
    use nd_storage::MemoryStore;

    async fn state_with_items(titles: &[(&str, &str)]) -> Arc<AppState> {
        let store = Arc::new(MemoryStore::new());
        let records: Vec<ArticleRecord> = titles
            .iter()
            .map(|(title, url)| ArticleRecord {
                title: title.to_string(),
                summary: title.to_string(),
                url: url.to_string(),
                image_url: None,
                source: "CBS News".to_string(),
                published_at: Utc::now(),
            })
            .collect();
        store.insert_new(&records).await.unwrap();

        let store: Arc<dyn NewsStore> = store;
        let pipeline = Arc::new(Pipeline::new(store.clone()).unwrap());
        Arc::new(AppState { store, pipeline })
    }

    #[tokio::test]
    async fn test_list_news_pages_through_items() {
        let state = state_with_items(&[
            ("First story", "https://example.com/1"),
            ("Second story", "https://example.com/2"),
        ])
        .await;

        let response = list_news(
            State(state),
            Query(Paging { skip: 0, limit: 10 }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_missing_item_is_404() {
        let state = state_with_items(&[]).await;
        let response = get_news_item(State(state), Path(42)).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_existing_item() {
        let state = state_with_items(&[("Only story", "https://example.com/only")]).await;
        let response = get_news_item(State(state), Path(1)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_site_trigger_is_404() {
        let state = state_with_items(&[]).await;
        let response = scrape_site(State(state), Path("lemonde".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
