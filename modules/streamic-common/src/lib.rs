pub mod config;
pub mod types;

pub use config::{Category, Config, CATEGORIES, DEFAULT_CATEGORY_KEY};
pub use types::{NormalizedItem, RawItem};
