use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tn_core::{Article, Error, NewsSource, Result, SourceMetadata};

use super::normalize_all;

const BASE_URL: &str = "https://newsdata.io";

#[derive(Debug, Deserialize)]
struct NewsDataResponse {
    status: Option<String>,
    #[serde(default)]
    results: Vec<NewsDataArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsDataArticle {
    title: Option<String>,
    description: Option<String>,
    source_url: Option<String>,
    link: Option<String>,
}

/// Topic search against NewsData.io's `/api/1/news` endpoint.
#[derive(Clone)]
pub struct NewsDataSource {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsDataSource {
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
        name: "NewsData.io",
        cli_name: "newsdata",
    };
}

fn to_articles(response: NewsDataResponse) -> Result<Vec<Article>> {
    if response.status.as_deref().is_some_and(|s| s != "success") {
        return Err(Error::upstream(
            NewsDataSource::METADATA.name,
            response.status.unwrap_or_default(),
        ));
    }

    Ok(normalize_all(
        NewsDataSource::METADATA.name,
        response.results.into_iter().map(|a| {
            (a.title, a.description, a.source_url.or(a.link))
        }),
    ))
}

#[async_trait]
impl NewsSource for NewsDataSource {
    fn metadata(&self) -> SourceMetadata {
        Self::METADATA
    }

    async fn fetch(&self, topic: &str) -> Result<Vec<Article>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::MissingApiKey(Self::METADATA.name.to_string()))?;

        let response = self
            .client
            .get(format!("{}/api/1/news", self.base_url))
            .query(&[("apikey", api_key), ("q", topic)])
            .send()
            .await?
            .error_for_status()?
            .json::<NewsDataResponse>()
            .await?;

        to_articles(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{http_client, spawn};
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use tn_core::PLACEHOLDER_SUMMARY;

    #[test]
    fn test_maps_fields_and_falls_back() {
        let response: NewsDataResponse = serde_json::from_value(json!({
            "status": "success",
            "results": [
                {"title": "Rust 2.0", "description": "It shipped", "source_url": "https://rust-lang.org"},
                {"title": "No description", "source_url": "https://example.com"},
                {"title": "Link only", "description": null, "link": "https://example.com/link"},
                {"title": "Sourceless"},
                {"description": "Untitled", "source_url": "https://example.com"}
            ]
        }))
        .unwrap();

        let articles = to_articles(response).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].summary, "It shipped");
        assert_eq!(articles[0].source, "https://rust-lang.org");
        assert_eq!(articles[1].summary, PLACEHOLDER_SUMMARY);
        assert_eq!(articles[2].source, "https://example.com/link");
    }

    #[test]
    fn test_error_status_is_upstream_failure() {
        let response: NewsDataResponse =
            serde_json::from_value(json!({"status": "error", "results": []})).unwrap();
        assert!(matches!(to_articles(response), Err(Error::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_fetch_sends_key_and_topic() {
        let app = Router::new().route(
            "/api/1/news",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("apikey").map(String::as_str) != Some("key") {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"status": "error"})));
                }
                let topic = params.get("q").cloned().unwrap_or_default();
                (
                    StatusCode::OK,
                    Json(json!({"status": "success", "results": [
                        {"title": topic, "description": "d", "source_url": "https://example.com"}
                    ]})),
                )
            }),
        );
        let base = spawn(app).await;

        let source = NewsDataSource::new(http_client(), Some("key".to_string())).with_base_url(&base);
        let articles = source.fetch("rust & tokio").await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "rust & tokio");

        let wrong_key = NewsDataSource::new(http_client(), Some("nope".to_string())).with_base_url(&base);
        assert!(matches!(wrong_key.fetch("rust").await, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn test_fetch_without_key_fails() {
        let source = NewsDataSource::new(http_client(), None).with_base_url("http://127.0.0.1:9");
        assert!(matches!(source.fetch("rust").await, Err(Error::MissingApiKey(_))));
    }

    #[tokio::test]
    async fn test_slow_provider_is_a_timeout_error() {
        let app = Router::new().route(
            "/api/1/news",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Json(json!({"status": "success", "results": []}))
            }),
        );
        let base = spawn(app).await;

        let client = tn_core::http_client(std::time::Duration::from_millis(300)).unwrap();
        let source = NewsDataSource::new(client, Some("key".to_string())).with_base_url(base);
        match source.fetch("rust").await {
            Err(Error::Http(e)) => assert!(e.is_timeout()),
            other => panic!("expected a timeout, got {:?}", other),
        }
    }
}
