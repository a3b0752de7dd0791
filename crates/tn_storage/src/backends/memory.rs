use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tn_core::{Article, ArticleCache, CacheSnapshot};
use tokio::sync::RwLock;

/// Process-local cache with the same freshness rules as [`super::FileCache`].
#[derive(Debug)]
pub struct MemoryCache {
    snapshot: RwLock<Option<CacheSnapshot>>,
    ttl: Duration,
    shared: bool,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            snapshot: RwLock::new(None),
            ttl,
            shared: false,
        }
    }

    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    pub async fn snapshot(&self) -> Option<CacheSnapshot> {
        self.snapshot.read().await.clone()
    }

    pub async fn replace(&self, snapshot: CacheSnapshot) {
        *self.snapshot.write().await = Some(snapshot);
    }
}

#[async_trait]
impl ArticleCache for MemoryCache {
    async fn load(&self, topic: &str) -> Option<Vec<Article>> {
        let guard = self.snapshot.read().await;
        guard
            .as_ref()
            .filter(|s| crate::serves_topic(s, topic, self.shared))
            .filter(|s| s.is_fresh(Utc::now(), self.ttl))
            .map(|s| s.articles.clone())
    }

    async fn save(&self, topic: &str, articles: &[Article]) {
        self.replace(CacheSnapshot::new(Some(topic.to_string()), articles.to_vec()))
            .await;
    }
}
