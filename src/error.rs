//! Error types for the document chat service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for document chat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Document chat errors
#[derive(Debug, Error)]
pub enum Error {
    /// Setup-time failure (missing credentials, bad configuration)
    #[error("Initialization error: {0}")]
    Init(String),

    /// File extension outside the supported set
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Text extraction failure for a specific file
    #[error("Failed to extract text from '{filename}': {message}")]
    Extraction { filename: String, message: String },

    /// Chunking configuration that cannot make forward progress
    #[error("Invalid chunk config: size={chunk_size}, overlap={overlap} (overlap must be < size)")]
    InvalidChunkConfig { chunk_size: usize, overlap: usize },

    /// Index build was given zero vectors
    #[error("Cannot build an index from an empty vector set")]
    EmptyVectorSet,

    /// Vectors of differing dimension
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Index artifact missing on disk
    #[error("Index not found at {0}")]
    IndexNotFound(String),

    /// Index artifact unreadable or internally inconsistent
    #[error("Index corrupt: {0}")]
    IndexCorrupt(String),

    /// Session has no persisted index
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Unknown ingestion job id
    #[error("Job not found: {0}")]
    JobNotFound(uuid::Uuid),

    /// Every document in the batch was skipped or blank
    #[error("No valid content extracted from documents")]
    NoContentExtracted,

    /// Embedding provider failure (timeout, malformed output, empty result)
    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    /// Generation provider failure
    #[error("Generation provider error: {0}")]
    GenerationProvider(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an initialization error
    pub fn init(message: impl Into<String>) -> Self {
        Self::Init(message.into())
    }

    /// Create an embedding provider error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::EmbeddingProvider(message.into())
    }

    /// Create a generation provider error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationProvider(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Error::Init(_) => (StatusCode::INTERNAL_SERVER_ERROR, "initialization_error"),
            Error::UnsupportedFormat(_) => (StatusCode::BAD_REQUEST, "unsupported_format"),
            Error::Extraction { .. } => (StatusCode::BAD_REQUEST, "extraction_error"),
            Error::InvalidChunkConfig { .. } => (StatusCode::BAD_REQUEST, "invalid_chunk_config"),
            Error::EmptyVectorSet => (StatusCode::UNPROCESSABLE_ENTITY, "empty_vector_set"),
            Error::DimensionMismatch { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "dimension_mismatch")
            }
            Error::IndexNotFound(_) => (StatusCode::NOT_FOUND, "index_not_found"),
            Error::IndexCorrupt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "index_corrupt"),
            Error::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            Error::JobNotFound(_) => (StatusCode::NOT_FOUND, "job_not_found"),
            Error::NoContentExtracted => (StatusCode::UNPROCESSABLE_ENTITY, "no_content_extracted"),
            Error::EmbeddingProvider(_) => (StatusCode::BAD_GATEWAY, "embedding_provider_error"),
            Error::GenerationProvider(_) => (StatusCode::BAD_GATEWAY, "generation_provider_error"),
            Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            Error::Json(_) => (StatusCode::BAD_REQUEST, "json_error"),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
