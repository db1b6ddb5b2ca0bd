/// Errors that can occur while computing an embedding.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    /// Building the HTTP client or sending the request failed.
    #[error("embedding request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("embedding service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The service answered without any vector.
    #[error("embedding service returned no vector")]
    EmptyResponse,
}
