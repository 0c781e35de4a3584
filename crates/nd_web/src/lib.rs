use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/news", get(handlers::list_news))
        .route("/news/:id", get(handlers::get_news_item))
        .route("/scrape-now", post(handlers::scrape_now))
        .route("/scrape/:site", post(handlers::scrape_site))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use nd_core::{NewsItem, Result};
}
