use std::sync::Arc;

use futures::future::join_all;
use tn_core::{AggregatorConfig, Article, ArticleCache, ImageProvider, NewsSource, SourceMetadata};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Fetch, merge, enrich and cache articles for a topic.
///
/// Upstream failures never escape: a failing source contributes no
/// articles and a failing image lookup leaves that article with no images.
pub struct NewsAggregator {
    sources: Vec<Arc<dyn NewsSource>>,
    images: Arc<dyn ImageProvider>,
    cache: Arc<dyn ArticleCache>,
    config: AggregatorConfig,
    semaphore: Semaphore,
}

impl NewsAggregator {
    pub fn new(
        images: Arc<dyn ImageProvider>,
        cache: Arc<dyn ArticleCache>,
        config: AggregatorConfig,
    ) -> Self {
        let semaphore = Semaphore::new(config.max_concurrent_enrichments.max(1));
        Self {
            sources: Vec::new(),
            images,
            cache,
            config,
            semaphore,
        }
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = Arc<dyn NewsSource>>) -> Self {
        self.sources.extend(sources);
        self
    }

    pub fn sources(&self) -> Vec<SourceMetadata> {
        self.sources.iter().map(|s| s.metadata()).collect()
    }

    pub fn image_provider(&self) -> &str {
        self.images.name()
    }

    /// Serves `topic` from the cache, aggregating on a miss.
    pub async fn get_news(&self, topic: &str) -> Vec<Article> {
        if let Some(articles) = self.cache.load(topic).await {
            debug!(topic, count = articles.len(), "cache hit");
            return articles;
        }
        debug!(topic, "cache miss");
        self.aggregate(topic).await
    }

    /// Runs the full pipeline for `topic` and replaces the cached snapshot.
    pub async fn aggregate(&self, topic: &str) -> Vec<Article> {
        let mut articles = self.collect(topic).await;
        articles.truncate(self.config.max_articles);

        let articles = self.enrich(articles).await;
        self.cache.save(topic, &articles).await;

        info!(topic, count = articles.len(), "aggregated news");
        articles
    }

    async fn collect(&self, topic: &str) -> Vec<Article> {
        let results = join_all(self.sources.iter().map(|source| source.fetch(topic))).await;

        results
            .into_iter()
            .zip(&self.sources)
            .flat_map(|(result, source)| {
                let name = source.metadata().name;
                match result {
                    Ok(articles) => {
                        debug!(source = name, count = articles.len(), "source returned articles");
                        articles
                    }
                    Err(e) => {
                        warn!(source = name, topic, error = %e, "source failed, skipping");
                        Vec::new()
                    }
                }
            })
            .collect()
    }

    async fn enrich(&self, articles: Vec<Article>) -> Vec<Article> {
        let enriched = articles.into_iter().map(|article| async move {
            let _permit = self.semaphore.acquire().await.ok();
            let images = match self.images.images_for(&article.title).await {
                Ok(mut images) => {
                    images.truncate(self.config.images_per_article);
                    images
                }
                Err(e) => {
                    warn!(provider = self.images.name(), title = %article.title, error = %e, "image lookup failed");
                    Vec::new()
                }
            };
            article.with_images(images)
        });

        join_all(enriched).await
    }
}
