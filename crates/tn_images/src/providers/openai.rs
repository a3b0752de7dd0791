use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tn_core::{Error, ImageProvider, Result};
use tracing::debug;

const BASE_URL: &str = "https://api.openai.com";
const MODEL: &str = "dall-e-2";
const SIZE: &str = "512x512";
/// dall-e-2 accepts `n` in 1..=10.
const MAX_IMAGES_PER_REQUEST: usize = 10;

#[derive(Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: usize,
    size: &'a str,
}

#[derive(Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

/// Generated illustrations from the OpenAI images API.
pub struct OpenAiImages {
    client: Client,
    api_key: Option<String>,
    limit: usize,
    base_url: String,
}

impl OpenAiImages {
    pub fn new(client: Client, api_key: Option<String>, limit: usize) -> Self {
        Self {
            client,
            api_key,
            limit,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for OpenAiImages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiImages")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("limit", &self.limit)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ImageProvider for OpenAiImages {
    fn name(&self) -> &str {
        "openai"
    }

    async fn images_for(&self, prompt: &str) -> Result<Vec<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::MissingApiKey("OpenAI".to_string()))?;
        let n = self.limit.min(MAX_IMAGES_PER_REQUEST);
        if n == 0 {
            return Ok(Vec::new());
        }

        let request = GenerationRequest {
            model: MODEL,
            prompt,
            n,
            size: SIZE,
        };

        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerationResponse>()
            .await?;
        debug!(prompt, generated = response.data.len(), "openai image generation");

        Ok(response
            .data
            .into_iter()
            .filter_map(|image| image.url)
            .take(n)
            .collect())
    }
}
