mod error;
mod traits;

pub mod http;
pub mod local;

use std::sync::Arc;

pub use error::EmbeddingError;
pub use traits::Embedder;

use crate::config::EmbeddingConfig;

/// Build the embedder selected by configuration: the HTTP client when an
/// endpoint URL is set, the local hashing embedder otherwise.
pub fn from_config(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    match config.url.as_deref() {
        Some(url) if !url.trim().is_empty() => {
            tracing::info!(url, model = %config.model, "Using remote embedding service");
            Ok(Arc::new(http::HttpEmbedder::new(config)?))
        }
        _ => {
            tracing::info!(
                dimensions = config.dimensions,
                "No embedding URL configured, using local hashing embedder"
            );
            Ok(Arc::new(local::HashingEmbedder::new(config.dimensions)))
        }
    }
}
