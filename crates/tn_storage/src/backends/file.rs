use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tn_core::{Article, ArticleCache, CacheSnapshot, Result};
use tokio::fs;
use tracing::{debug, warn};

/// Single-file JSON snapshot cache.
///
/// Writes land in a temporary sibling file that is renamed over the
/// snapshot, so a reader sees either the old snapshot or the new one.
/// Concurrent writers are last-writer-wins.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
    ttl: Duration,
    shared: bool,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            shared: false,
        }
    }

    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot file; `Ok(None)` when there is none yet.
    pub async fn read_snapshot(&self) -> Result<Option<CacheSnapshot>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    pub async fn write_snapshot(&self, snapshot: &CacheSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cache".to_string());
        let tmp = self
            .path
            .with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

        fs::write(&tmp, serde_json::to_vec(snapshot)?).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleCache for FileCache {
    async fn load(&self, topic: &str) -> Option<Vec<Article>> {
        let snapshot = match self.read_snapshot().await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable cache");
                return None;
            }
        };

        if !crate::serves_topic(&snapshot, topic, self.shared) {
            debug!(topic, cached = ?snapshot.topic, "cache holds another topic");
            return None;
        }
        if !snapshot.is_fresh(Utc::now(), self.ttl) {
            debug!(topic, timestamp = %snapshot.timestamp, "cache expired");
            return None;
        }
        Some(snapshot.articles)
    }

    async fn save(&self, topic: &str, articles: &[Article]) {
        let snapshot = CacheSnapshot::new(Some(topic.to_string()), articles.to_vec());
        if let Err(e) = self.write_snapshot(&snapshot).await {
            warn!(path = %self.path.display(), error = %e, "failed to write cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use tempfile::tempdir;

    fn article(title: &str) -> Article {
        Article::normalize("test", Some(title.to_string()), None, Some("https://example.com".to_string()))
            .unwrap()
            .with_images(vec!["https://img.example/1".to_string()])
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("news_cache.json"), Duration::from_secs(120));

        assert!(cache.load("rust").await.is_none());
        cache.save("rust", &[article("a"), article("b")]).await;

        let loaded = cache.load("rust").await.unwrap();
        assert_eq!(loaded, vec![article("a"), article("b")]);

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(cache.path()).unwrap()).unwrap();
        assert!(raw["timestamp"].is_string());
        assert_eq!(raw["news"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ttl_boundary() {
        let dir = tempdir().unwrap();
        let ttl = Duration::from_secs(120);
        let cache = FileCache::new(dir.path().join("news_cache.json"), ttl);

        let mut snapshot = CacheSnapshot::new(Some("rust".to_string()), vec![article("a")]);
        snapshot.timestamp = Utc::now() - ChronoDuration::seconds(110);
        cache.write_snapshot(&snapshot).await.unwrap();
        assert!(cache.load("rust").await.is_some());

        snapshot.timestamp = Utc::now() - ChronoDuration::seconds(130);
        cache.write_snapshot(&snapshot).await.unwrap();
        assert!(cache.load("rust").await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_a_miss() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("news_cache.json");
        let cache = FileCache::new(&path, Duration::from_secs(120)).shared(true);

        std::fs::write(&path, b"{not json").unwrap();
        assert!(cache.load("rust").await.is_none());

        std::fs::write(&path, br#"{"news": []}"#).unwrap();
        assert!(cache.load("rust").await.is_none());

        cache.save("rust", &[]).await;
        assert_eq!(cache.load("rust").await, Some(vec![]));
    }

    #[tokio::test]
    async fn test_topic_scoping() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("news_cache.json");
        let keyed = FileCache::new(&path, Duration::from_secs(120));
        let shared = FileCache::new(&path, Duration::from_secs(120)).shared(true);

        keyed.save("rust", &[article("a")]).await;
        assert!(keyed.load("go").await.is_none());
        assert!(keyed.load("rust").await.is_some());
        assert!(shared.load("go").await.is_some());
    }

    #[tokio::test]
    async fn test_reads_legacy_snapshot_in_shared_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("news_cache.json");
        let naive = Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        std::fs::write(
            &path,
            format!(
                r#"{{"timestamp": "{}", "news": [{{"title": "t", "summary": "s", "source": "https://example.com"}}]}}"#,
                naive
            ),
        )
        .unwrap();

        let shared = FileCache::new(&path, Duration::from_secs(120)).shared(true);
        assert_eq!(shared.load("anything").await.unwrap().len(), 1);
        assert!(FileCache::new(&path, Duration::from_secs(120)).load("anything").await.is_none());
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        // The cache path is a directory, so the final rename fails.
        let cache = FileCache::new(dir.path(), Duration::from_secs(120));
        cache.save("rust", &[article("a")]).await;
        assert!(cache.load("rust").await.is_none());
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("nested/deeper/cache.json"), Duration::from_secs(60));
        cache.save("rust", &[article("a")]).await;
        assert!(cache.load("rust").await.is_some());
    }
}
