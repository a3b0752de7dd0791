use std::sync::Arc;
use std::time::Duration;

use tn_core::{Error, ImageProvider, Result};

pub mod none;
pub mod openai;
pub mod pollinations;
pub mod unsplash;

pub use none::NoImages;
pub use openai::OpenAiImages;
pub use pollinations::PollinationsImages;
pub use unsplash::UnsplashImages;

#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub provider: String,
    pub images_per_article: usize,
    pub request_timeout: Duration,
    pub unsplash_key: Option<String>,
    pub openai_key: Option<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            provider: "pollinations".to_string(),
            images_per_article: 3,
            request_timeout: Duration::from_secs(10),
            unsplash_key: None,
            openai_key: None,
        }
    }
}

pub fn available_providers() -> Vec<&'static str> {
    vec!["pollinations", "unsplash", "openai", "none"]
}

pub fn create_provider(config: &ImageConfig) -> Result<Arc<dyn ImageProvider>> {
    match config.provider.as_str() {
        "pollinations" => Ok(Arc::new(PollinationsImages::new())),
        "unsplash" => Ok(Arc::new(UnsplashImages::new(
            tn_core::http_client(config.request_timeout)?,
            config.unsplash_key.clone(),
            config.images_per_article,
        ))),
        "openai" => Ok(Arc::new(OpenAiImages::new(
            tn_core::http_client(config.request_timeout)?,
            config.openai_key.clone(),
            config.images_per_article,
        ))),
        "none" => Ok(Arc::new(NoImages)),
        other => Err(Error::Config(format!(
            "Unknown image provider: {}. Available providers: {}",
            other,
            available_providers().join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider() {
        for name in available_providers() {
            let config = ImageConfig {
                provider: name.to_string(),
                ..Default::default()
            };
            assert_eq!(create_provider(&config).unwrap().name(), name);
        }

        let config = ImageConfig {
            provider: "midjourney".to_string(),
            ..Default::default()
        };
        assert!(matches!(create_provider(&config), Err(Error::Config(_))));
    }
}
