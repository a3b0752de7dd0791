use async_trait::async_trait;

use crate::types::Article;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMetadata {
    /// Human-readable provider name, used in logs
    pub name: &'static str,
    /// Short name accepted on the command line
    pub cli_name: &'static str,
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    fn metadata(&self) -> SourceMetadata;

    /// Fetches articles for `topic`, already normalized to [`Article`].
    ///
    /// Errors are reported, not swallowed: the aggregator decides that a
    /// failing source contributes nothing.
    async fn fetch(&self, topic: &str) -> Result<Vec<Article>>;
}
