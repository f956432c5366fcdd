//! Embedding providers for the policy index.
//!
//! The embedding function is opaque to the rest of the core: text in,
//! fixed-length vector out, deterministic for identical input. Providers
//! are selected by configuration via `create_provider`.

pub mod provider;
pub mod providers;

pub use provider::EmbeddingProvider;
pub use providers::{OllamaEmbedder, TrigramProvider};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wayfinder_core::{AppError, AppResult};

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider identifier ("trigram" or "ollama")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Embedding vector dimension
    pub dimensions: usize,

    /// Custom endpoint for remote providers
    pub endpoint: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
            endpoint: None,
        }
    }
}

/// Create an embedding provider based on configuration.
pub fn create_provider(config: &EmbeddingConfig) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "trigram" => Ok(Arc::new(TrigramProvider::new(config.dimensions))),

        "ollama" => {
            let endpoint = config
                .endpoint
                .clone()
                .unwrap_or_else(|| "http://localhost:11434".to_string());
            Ok(Arc::new(OllamaEmbedder::new(
                endpoint,
                config.model.clone(),
                config.dimensions,
            )))
        }

        _ => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: trigram, ollama",
            config.provider
        ))),
    }
}
