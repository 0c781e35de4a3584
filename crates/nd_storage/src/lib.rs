pub mod backends;

pub use backends::memory::MemoryStore;
pub use backends::sqlite::SqliteStore;

pub mod prelude {
    pub use super::backends::*;
    pub use nd_core::{NewsStore, Result};
}
