use async_trait::async_trait;
use tn_core::{ImageProvider, Result};
use url::Url;

const BASE_URL: &str = "https://image.pollinations.ai/prompt/";

/// Builds a Pollinations image URL from the prompt.
///
/// The image is rendered lazily by Pollinations when the URL is first
/// requested, so no request is made here and the URL is not validated.
#[derive(Debug, Clone)]
pub struct PollinationsImages {
    base_url: String,
}

impl PollinationsImages {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn image_url(&self, prompt: &str) -> Result<String> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| tn_core::Error::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(prompt);
        Ok(url.to_string())
    }
}

impl Default for PollinationsImages {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProvider for PollinationsImages {
    fn name(&self) -> &str {
        "pollinations"
    }

    async fn images_for(&self, prompt: &str) -> Result<Vec<String>> {
        Ok(vec![self.image_url(prompt)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builds_escaped_url() {
        let images = PollinationsImages::new();
        let urls = images.images_for("Rust 2.0 / what's new?").await.unwrap();
        assert_eq!(
            urls,
            vec!["https://image.pollinations.ai/prompt/Rust%202.0%20%2F%20what's%20new%3F"]
        );
    }

    #[test]
    fn test_is_deterministic() {
        let images = PollinationsImages::new();
        assert_eq!(images.image_url("same").unwrap(), images.image_url("same").unwrap());
    }
}
