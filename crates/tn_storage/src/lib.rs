use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tn_core::{ArticleCache, Error, Result};

pub mod backends;

pub use backends::*;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// `file` or `memory`
    pub backend: String,
    pub path: PathBuf,
    pub ttl: Duration,
    /// One snapshot answers every topic instead of only the one it was built for
    pub shared: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            path: PathBuf::from("news_cache.json"),
            ttl: Duration::from_secs(24 * 60 * 60),
            shared: false,
        }
    }
}

pub fn create_cache(config: &CacheConfig) -> Result<Arc<dyn ArticleCache>> {
    match config.backend.as_str() {
        "file" => Ok(Arc::new(
            FileCache::new(config.path.clone(), config.ttl).shared(config.shared),
        )),
        "memory" => Ok(Arc::new(MemoryCache::new(config.ttl).shared(config.shared))),
        other => Err(Error::Config(format!(
            "Unknown cache backend: {}. Available backends: file, memory",
            other
        ))),
    }
}

/// Whether `snapshot` may answer a request for `topic`.
pub(crate) fn serves_topic(snapshot: &tn_core::CacheSnapshot, topic: &str, shared: bool) -> bool {
    shared || snapshot.topic.as_deref() == Some(topic)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_cache, CacheConfig};
}
