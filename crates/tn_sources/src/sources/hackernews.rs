use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tn_core::{Article, NewsSource, Result, SourceMetadata};
use tracing::debug;

const BASE_URL: &str = "https://hacker-news.firebaseio.com";
const DISCUSSION_URL: &str = "https://news.ycombinator.com/item?id=";

#[derive(Debug, Deserialize)]
struct HackerNewsItem {
    id: u64,
    title: Option<String>,
    url: Option<String>,
}

/// Trending stories from Hacker News.
///
/// Two-stage: the ranked id list first, then each of the top `limit` items
/// on its own. The list is global, so the topic is not used to filter it.
#[derive(Clone)]
pub struct HackerNewsSource {
    client: Client,
    limit: usize,
    base_url: String,
}

impl HackerNewsSource {
    pub fn new(client: Client, limit: usize) -> Self {
        Self {
            client,
            limit,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub const METADATA: SourceMetadata = SourceMetadata {
        name: "Hacker News",
        cli_name: "hackernews",
    };

    async fn top_story_ids(&self) -> Result<Vec<u64>> {
        Ok(self
            .client
            .get(format!("{}/v0/topstories.json", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<u64>>()
            .await?)
    }

    async fn item(&self, id: u64) -> Result<Article> {
        let item = self
            .client
            .get(format!("{}/v0/item/{}.json", self.base_url, id))
            .send()
            .await?
            .error_for_status()?
            .json::<HackerNewsItem>()
            .await?;

        let source = item
            .url
            .or_else(|| Some(format!("{}{}", DISCUSSION_URL, item.id)));
        Article::normalize(Self::METADATA.name, item.title, None, source)
    }
}

#[async_trait]
impl NewsSource for HackerNewsSource {
    fn metadata(&self) -> SourceMetadata {
        Self::METADATA
    }

    async fn fetch(&self, topic: &str) -> Result<Vec<Article>> {
        let ids = self.top_story_ids().await?;
        debug!(topic, stories = ids.len(), "fetched Hacker News top stories");

        let items = join_all(ids.into_iter().take(self.limit).map(|id| async move {
            (id, self.item(id).await)
        }))
        .await;

        Ok(items
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(article) => Some(article),
                Err(e) => {
                    debug!(id, error = %e, "skipping Hacker News item");
                    None
                }
            })
            .collect())
    }
}
