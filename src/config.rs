//! Configuration for the document chat service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
///
/// Constructed once at process start and passed by reference into the
/// ingestion and retrieval pipelines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Storage layout
    pub storage: StorageConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    pub embedding: EmbeddingConfig,
    /// LLM configuration
    pub llm: LlmConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::init(format!("Failed to read config {}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| Error::init(format!("Failed to parse config {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that can never work
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 || self.chunking.chunk_overlap >= self.chunking.chunk_size
        {
            return Err(Error::InvalidChunkConfig {
                chunk_size: self.chunking.chunk_size,
                overlap: self.chunking.chunk_overlap,
            });
        }
        if self.retrieval.max_top_k == 0 {
            return Err(Error::init("retrieval.max_top_k must be at least 1"));
        }
        if self.retrieval.default_top_k > self.retrieval.max_top_k {
            return Err(Error::init(format!(
                "retrieval.default_top_k ({}) exceeds max_top_k ({})",
                self.retrieval.default_top_k, self.retrieval.max_top_k
            )));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024,
        }
    }
}

/// Storage layout configuration
///
/// Both bases get one subdirectory per session; see [`crate::session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory for per-session raw uploads
    pub upload_base: PathBuf,
    /// Base directory for per-session vector indexes
    pub index_base: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_base: PathBuf::from("data/document_chat"),
            index_base: PathBuf::from("vector_index"),
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Window size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive windows in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            chunk_overlap: 200,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Hugging Face model id
    pub model: String,
    /// Inference endpoint base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Generation provider selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Groq,
    Google,
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Which generation backend to use
    pub provider: LlmProvider,
    /// Model for the Groq backend
    pub groq_model: String,
    /// Model for the Google backend
    pub google_model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Groq,
            groq_model: "llama-3.3-70b-versatile".to_string(),
            google_model: "gemini-2.0-flash".to_string(),
            temperature: 0.0,
            max_output_tokens: 2048,
            timeout_secs: 120,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// top_k used when the caller does not supply one
    pub default_top_k: usize,
    /// Hard upper bound on caller-supplied top_k
    pub max_top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            max_top_k: 20,
        }
    }
}

/// API credentials, validated once at startup
///
/// Only the keys the configured providers actually need are required, so a
/// Groq deployment does not have to carry a Google key.
#[derive(Debug, Clone)]
pub struct ApiKeys {
    /// Hugging Face token for the embedding endpoint
    pub hf_token: String,
    /// Groq API key (required when `llm.provider = "groq"`)
    pub groq_api_key: Option<String>,
    /// Google API key (required when `llm.provider = "google"`)
    pub google_api_key: Option<String>,
}

impl ApiKeys {
    /// Read credentials from the environment and fail fast on missing ones
    pub fn from_env(provider: LlmProvider) -> Result<Self> {
        let hf_token = std::env::var("HF_TOKEN").ok().filter(|v| !v.is_empty());
        let groq_api_key = std::env::var("GROQ_API_KEY").ok().filter(|v| !v.is_empty());
        let google_api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        if hf_token.is_none() {
            missing.push("HF_TOKEN");
        }
        match provider {
            LlmProvider::Groq if groq_api_key.is_none() => missing.push("GROQ_API_KEY"),
            LlmProvider::Google if google_api_key.is_none() => missing.push("GOOGLE_API_KEY"),
            _ => {}
        }
        if !missing.is_empty() {
            return Err(Error::init(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            hf_token: hf_token.unwrap_or_default(),
            groq_api_key,
            google_api_key,
        })
    }
}
