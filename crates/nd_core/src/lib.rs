pub mod error;
pub mod store;
pub mod types;

pub use error::Error;
pub use store::NewsStore;
pub use types::{ArticleRecord, NewsItem};

pub type Result<T> = std::result::Result<T, Error>;
