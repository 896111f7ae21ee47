pub mod catalog;
pub mod client;
pub mod content;
pub mod error;
pub mod hero;
mod html;
pub mod normalize;
pub mod profiler;
pub mod signals;
pub mod types;
pub mod url;

pub use catalog::extract_catalog;
pub use client::{FetchConfig, Page, StoreClient};
pub use content::extract_text;
pub use error::ScraperError;
pub use hero::extract_hero;
pub use profiler::StoreProfiler;
pub use url::normalize_store_url;
