use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tn_core::{Article, Error, NewsSource, Result, SourceMetadata};

use super::normalize_all;

const BASE_URL: &str = "https://newsapi.org";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

/// Topic search against NewsAPI's `/v2/everything` endpoint.
#[derive(Clone)]
pub struct NewsApiSource {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiSource {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub const METADATA: SourceMetadata = SourceMetadata {
        name: "NewsAPI",
        cli_name: "newsapi",
    };
}

fn to_articles(response: NewsApiResponse) -> Result<Vec<Article>> {
    if response.status != "ok" {
        let status = match (response.code, response.message) {
            (Some(code), Some(message)) => format!("{}: {}", code, message),
            (code, message) => code.or(message).unwrap_or(response.status),
        };
        return Err(Error::upstream(NewsApiSource::METADATA.name, status));
    }

    Ok(normalize_all(
        NewsApiSource::METADATA.name,
        response
            .articles
            .into_iter()
            .map(|a| (a.title, a.description, a.url)),
    ))
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn metadata(&self) -> SourceMetadata {
        Self::METADATA
    }

    async fn fetch(&self, topic: &str) -> Result<Vec<Article>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::MissingApiKey(Self::METADATA.name.to_string()))?;

        // NewsAPI reports errors with a JSON body, so the status is checked after decoding.
        let response = self
            .client
            .get(format!("{}/v2/everything", self.base_url))
            .query(&[("q", topic), ("apiKey", api_key)])
            .send()
            .await?
            .json::<NewsApiResponse>()
            .await?;

        to_articles(response)
    }
}
