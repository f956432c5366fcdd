//! Ollama embedding provider.
//!
//! Calls the Ollama embeddings endpoint once per text. Failures surface as
//! upstream errors naming the embedding call; retries are the caller's
//! decision.

use crate::embeddings::provider::EmbeddingProvider;
use serde::{Deserialize, Serialize};
use wayfinder_core::{AppError, AppResult};

/// Ollama embeddings API request format.
#[derive(Debug, Serialize)]
struct OllamaEmbeddingRequest {
    model: String,
    prompt: String,
}

/// Ollama embeddings API response format.
#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

/// Embedding provider backed by a local Ollama instance.
#[derive(Debug)]
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    dimensions: usize,
    client: reqwest::Client,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, dimensions: usize) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            dimensions,
            client: reqwest::Client::new(),
        }
    }

    async fn embed_one(&self, text: &str) -> AppResult<Vec<f32>> {
        let request = OllamaEmbeddingRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };
        let url = format!("{}/api/embeddings", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::Upstream(format!("Embedding request to Ollama failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream(format!(
                "Embedding call failed, Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: OllamaEmbeddingResponse = response.json().await.map_err(|e| {
            AppError::Upstream(format!("Failed to parse Ollama embedding response: {}", e))
        })?;

        if parsed.embedding.len() != self.dimensions {
            return Err(AppError::Upstream(format!(
                "Embedding call returned {} dimensions, expected {}",
                parsed.embedding.len(),
                self.dimensions
            )));
        }

        Ok(parsed.embedding)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        tracing::debug!("Embedding {} texts via Ollama", texts.len());

        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed_one(text).await?);
        }

        Ok(embeddings)
    }
}
