use std::sync::Arc;

use tn_core::{AggregatorConfig, ApiKeys, Article, Error, NewsSource, Result, SourceMetadata};
use tracing::debug;

pub mod hackernews;
pub mod newsapi;
pub mod newsdata;

pub use hackernews::HackerNewsSource;
pub use newsapi::NewsApiSource;
pub use newsdata::NewsDataSource;

/// Registration order used when no explicit list is configured.
pub const DEFAULT_SOURCES: &[&str] = &["newsdata", "newsapi", "hackernews"];

pub fn available_sources() -> Vec<SourceMetadata> {
    vec![
        NewsDataSource::METADATA,
        NewsApiSource::METADATA,
        HackerNewsSource::METADATA,
    ]
}

/// Builds the named sources, keeping the order of `names`.
pub fn build_sources<S: AsRef<str>>(
    names: &[S],
    config: &AggregatorConfig,
    keys: &ApiKeys,
) -> Result<Vec<Arc<dyn NewsSource>>> {
    let client = tn_core::http_client(config.request_timeout)?;

    names
        .iter()
        .map(|name| -> Result<Arc<dyn NewsSource>> {
            match name.as_ref().trim() {
                "newsdata" => Ok(Arc::new(NewsDataSource::new(client.clone(), keys.newsdata.clone()))),
                "newsapi" => Ok(Arc::new(NewsApiSource::new(client.clone(), keys.newsapi.clone()))),
                "hackernews" => Ok(Arc::new(HackerNewsSource::new(client.clone(), config.trending_limit))),
                other => Err(Error::Config(format!("Unknown news source: {}", other))),
            }
        })
        .collect()
}

/// Normalizes raw `(title, summary, source)` records, dropping the ones
/// that cannot form a valid [`Article`].
pub(crate) fn normalize_all<I>(provider: &str, records: I) -> Vec<Article>
where
    I: IntoIterator<Item = (Option<String>, Option<String>, Option<String>)>,
{
    records
        .into_iter()
        .filter_map(|(title, summary, source)| {
            Article::normalize(provider, title, summary, source)
                .map_err(|e| debug!(error = %e, "dropping article"))
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sources_keeps_order() {
        let sources = build_sources(
            &["hackernews", "newsdata"],
            &AggregatorConfig::default(),
            &ApiKeys::default(),
        )
        .unwrap();
        let names: Vec<_> = sources.iter().map(|s| s.metadata().cli_name).collect();
        assert_eq!(names, vec!["hackernews", "newsdata"]);
    }

    #[test]
    fn test_build_sources_rejects_unknown() {
        let result = build_sources(&["newsdata", "teletext"], &AggregatorConfig::default(), &ApiKeys::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_defaults_are_available() {
        let available: Vec<_> = available_sources().iter().map(|m| m.cli_name).collect();
        assert_eq!(available, DEFAULT_SOURCES);
    }
}
