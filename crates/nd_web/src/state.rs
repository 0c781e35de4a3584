use nd_core::NewsStore;
use nd_scrapers::Pipeline;
use std::sync::Arc;

pub struct AppState {
    pub store: Arc<dyn NewsStore>,
    pub pipeline: Arc<Pipeline>,
}
