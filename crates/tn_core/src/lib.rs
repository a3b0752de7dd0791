pub mod config;
pub mod error;
pub mod images;
pub mod sources;
pub mod storage;
pub mod types;

pub use config::{AggregatorConfig, ApiKeys};
pub use error::{Error, Result};
pub use images::ImageProvider;
pub use sources::{NewsSource, SourceMetadata};
pub use storage::ArticleCache;
pub use types::{Article, CacheSnapshot, PLACEHOLDER_SUMMARY};

/// Builds the HTTP client shared by one provider, with the per-call timeout.
pub fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
