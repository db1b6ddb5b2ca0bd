use async_trait::async_trait;

use super::error::EmbeddingError;

/// Turns free text into a numeric vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Identifier of the model, stored next to each vector.
    fn model_name(&self) -> &str;
}
