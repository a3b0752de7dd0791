use async_trait::async_trait;
use std::fmt;

use crate::Result;

#[async_trait]
pub trait ImageProvider: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Returns image URLs illustrating `prompt` (usually an article title).
    async fn images_for(&self, prompt: &str) -> Result<Vec<String>>;
}
