use async_trait::async_trait;
use tn_core::{ImageProvider, Result};

/// Leaves every article without images.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

#[async_trait]
impl ImageProvider for NoImages {
    fn name(&self) -> &str {
        "none"
    }

    async fn images_for(&self, _prompt: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
