use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tn_core::{Error, ImageProvider, Result};
use tracing::debug;

const BASE_URL: &str = "https://api.unsplash.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

/// Stock photos from the Unsplash search API.
pub struct UnsplashImages {
    client: Client,
    access_key: Option<String>,
    limit: usize,
    base_url: String,
}

impl UnsplashImages {
    pub fn new(client: Client, access_key: Option<String>, limit: usize) -> Self {
        Self {
            client,
            access_key,
            limit,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for UnsplashImages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsplashImages")
            .field("access_key", &self.access_key.as_deref().map(|_| "<redacted>"))
            .field("limit", &self.limit)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ImageProvider for UnsplashImages {
    fn name(&self) -> &str {
        "unsplash"
    }

    async fn images_for(&self, prompt: &str) -> Result<Vec<String>> {
        let access_key = self
            .access_key
            .as_deref()
            .ok_or_else(|| Error::MissingApiKey("Unsplash".to_string()))?;

        let per_page = self.limit.to_string();
        let response = self
            .client
            .get(format!("{}/search/photos", self.base_url))
            .header("Authorization", format!("Client-ID {}", access_key))
            .query(&[("query", prompt), ("per_page", per_page.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResponse>()
            .await?;
        debug!(prompt, found = response.results.len(), "unsplash search");

        Ok(response
            .results
            .into_iter()
            .take(self.limit)
            .map(|photo| photo.urls.regular)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{http_client, spawn};
    use axum::{extract::Query, http::HeaderMap, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn fake_unsplash() -> Router {
        Router::new().route(
            "/search/photos",
            get(|headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    == Some("Client-ID key");
                if !authorized {
                    return (StatusCode::UNAUTHORIZED, Json(Value::Null));
                }
                let query = params.get("query").cloned().unwrap_or_default();
                let results: Vec<_> = (0..5)
                    .map(|i| json!({"id": i, "urls": {"regular": format!("https://unsplash.example/{}/{}", query, i)}}))
                    .collect();
                (StatusCode::OK, Json(json!({"total": 5, "results": results})))
            }),
        )
    }

    #[tokio::test]
    async fn test_returns_at_most_limit_urls() {
        let base = spawn(fake_unsplash()).await;
        let images = UnsplashImages::new(http_client(), Some("key".to_string()), 3).with_base_url(base);

        let urls = images.images_for("rust").await.unwrap();
        assert_eq!(
            urls,
            vec![
                "https://unsplash.example/rust/0",
                "https://unsplash.example/rust/1",
                "https://unsplash.example/rust/2",
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_key_is_an_error() {
        let base = spawn(fake_unsplash()).await;
        let images = UnsplashImages::new(http_client(), Some("wrong".to_string()), 3).with_base_url(base);
        assert!(images.images_for("rust").await.is_err());

        let images = UnsplashImages::new(http_client(), None, 3);
        assert!(matches!(images.images_for("rust").await, Err(Error::MissingApiKey(_))));
    }
}
