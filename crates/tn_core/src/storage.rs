use async_trait::async_trait;

use crate::types::Article;

/// Best-effort article cache.
///
/// Neither method can fail from the caller's point of view: unreadable or
/// stale state is a miss, and write failures are only logged.
#[async_trait]
pub trait ArticleCache: Send + Sync {
    /// Returns the cached articles for `topic` if a fresh snapshot exists.
    async fn load(&self, topic: &str) -> Option<Vec<Article>>;

    /// Replaces the current snapshot with `articles`.
    async fn save(&self, topic: &str, articles: &[Article]);
}
