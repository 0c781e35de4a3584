pub mod extract;
pub mod filter;
pub mod pipeline;
pub mod scheduler;
pub mod sites;

pub use pipeline::Pipeline;
pub use sites::{Site, ALL_SITES};

pub mod prelude {
    pub use super::pipeline::Pipeline;
    pub use super::sites::{Site, ALL_SITES};
    pub use nd_core::{ArticleRecord, Result};
}
