//! Hugging Face Inference API embedding provider

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

use super::EmbeddingProvider;

/// Embedding client for the feature-extraction pipeline of the Hugging Face
/// Inference API
pub struct HfEmbedder {
    client: Client,
    base_url: String,
    model: String,
    token: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [String],
    options: EmbedOptions,
}

#[derive(Serialize)]
struct EmbedOptions {
    wait_for_model: bool,
}

impl HfEmbedder {
    pub fn new(config: &EmbeddingConfig, token: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::init(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            token,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/pipeline/feature-extraction/{}",
            self.base_url, self.model
        )
    }

    async fn request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbedRequest {
            inputs: texts,
            options: EmbedOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!("HTTP {}: {}", status, body)));
        }

        let embeddings: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("malformed response body: {}", e)))?;

        if embeddings.len() != texts.len() {
            return Err(Error::embedding(format!(
                "provider returned {} embeddings for {} inputs",
                embeddings.len(),
                texts.len()
            )));
        }

        let dimension = embeddings.first().map(|v| v.len()).unwrap_or(0);
        if dimension == 0 || embeddings.iter().any(|v| v.len() != dimension) {
            return Err(Error::embedding(
                "provider returned empty or ragged embeddings",
            ));
        }

        Ok(embeddings)
    }
}

#[async_trait]
impl EmbeddingProvider for HfEmbedder {
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text.to_string()];
        let mut embeddings = self.request(&texts).await?;
        embeddings
            .pop()
            .ok_or_else(|| Error::embedding("provider returned no embedding"))
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}
