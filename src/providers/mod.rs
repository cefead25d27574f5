//! Capability providers for embeddings and answer generation
//!
//! Both capabilities are opaque beyond their signatures: the pipelines call
//! them, wrap their failures, and never retry or fall back between backends.

pub mod google;
pub mod groq;
pub mod hf;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{ApiKeys, AppConfig, LlmProvider};
use crate::error::Result;

pub use google::GeminiClient;
pub use groq::GroqClient;
pub use hf::HfEmbedder;

/// Maps text to fixed-dimension float vectors
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch, preserving input order and length
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Generates an answer from a fully rendered prompt
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for the prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier in use
    fn model(&self) -> &str;
}

/// Build the embedding provider from config + credentials
pub fn embedding_provider(
    config: &AppConfig,
    keys: &ApiKeys,
) -> Result<Arc<dyn EmbeddingProvider>> {
    Ok(Arc::new(HfEmbedder::new(
        &config.embedding,
        keys.hf_token.clone(),
    )?))
}

/// Build the generation provider selected by the config tag
///
/// The tag set is closed; an unconfigurable provider cannot be reached here,
/// and a missing key for the selected provider already failed at
/// `ApiKeys::from_env`.
pub fn generation_provider(
    config: &AppConfig,
    keys: &ApiKeys,
) -> Result<Arc<dyn GenerationProvider>> {
    match config.llm.provider {
        LlmProvider::Groq => {
            let key = keys
                .groq_api_key
                .clone()
                .ok_or_else(|| crate::error::Error::init("GROQ_API_KEY is not set"))?;
            Ok(Arc::new(GroqClient::new(&config.llm, key)?))
        }
        LlmProvider::Google => {
            let key = keys
                .google_api_key
                .clone()
                .ok_or_else(|| crate::error::Error::init("GOOGLE_API_KEY is not set"))?;
            Ok(Arc::new(GeminiClient::new(&config.llm, key)?))
        }
    }
}
