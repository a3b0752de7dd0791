use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Summary used when a provider has no description for an article.
pub const PLACEHOLDER_SUMMARY: &str = "No description available.";

/// The canonical article every source adapter normalizes into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub source: String,
    /// Set by the enricher; `None` until the article has been through it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Article {
    /// Builds an article from raw provider fields.
    ///
    /// Blank or missing `title`/`source` is a [`Error::MissingField`];
    /// a blank or missing summary becomes [`PLACEHOLDER_SUMMARY`].
    pub fn normalize(
        provider: &str,
        title: Option<String>,
        summary: Option<String>,
        source: Option<String>,
    ) -> Result<Self> {
        let title = non_blank(title).ok_or_else(|| Error::missing_field(provider, "title"))?;
        let source = non_blank(source).ok_or_else(|| Error::missing_field(provider, "source"))?;
        let summary = non_blank(summary).unwrap_or_else(|| PLACEHOLDER_SUMMARY.to_string());

        Ok(Self {
            title,
            summary,
            source,
            images: None,
        })
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// What the cache persists: one timestamped batch of articles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot {
    #[serde(deserialize_with = "deserialize_utc")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(rename = "news")]
    pub articles: Vec<Article>,
}

impl CacheSnapshot {
    pub fn new(topic: Option<String>, articles: Vec<Article>) -> Self {
        Self {
            timestamp: Utc::now(),
            topic,
            articles,
        }
    }

    /// True while `now - timestamp < ttl`. A timestamp in the future counts as fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: std::time::Duration) -> bool {
        match now.signed_duration_since(self.timestamp).to_std() {
            Ok(age) => age < ttl,
            Err(_) => true,
        }
    }
}

/// Accepts RFC 3339 as well as naive ISO-8601 timestamps (read as UTC).
fn deserialize_utc<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}
