use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Articles kept after concatenating every source
    pub max_articles: usize,
    /// Items fetched individually by the trending source
    pub trending_limit: usize,
    /// Upper bound on images attached to one article
    pub images_per_article: usize,
    /// Applied to every outbound provider request
    pub request_timeout: Duration,
    pub max_concurrent_enrichments: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_articles: 10,
            trending_limit: 5,
            images_per_article: 3,
            request_timeout: Duration::from_secs(10),
            max_concurrent_enrichments: 4,
        }
    }
}

/// Provider secrets, each optional: a missing key disables that provider
/// per call instead of failing startup.
#[derive(Clone, Default)]
pub struct ApiKeys {
    pub newsdata: Option<String>,
    pub newsapi: Option<String>,
    pub unsplash: Option<String>,
    pub openai: Option<String>,
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &Option<String>| key.as_deref().map(|_| "<redacted>");
        f.debug_struct("ApiKeys")
            .field("newsdata", &redact(&self.newsdata))
            .field("newsapi", &redact(&self.newsapi))
            .field("unsplash", &redact(&self.unsplash))
            .field("openai", &redact(&self.openai))
            .finish()
    }
}
