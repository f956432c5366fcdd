//! In-memory vector index over policy chunks.
//!
//! Built wholesale from the chunk sequence and read-only afterwards; any
//! document change means a full rebuild. The on-disk snapshot is an opaque
//! JSON blob with load/save only.

use crate::embeddings::EmbeddingProvider;
use crate::types::{PolicyChunk, RetrievalResult, RetrievedChunk};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;
use wayfinder_core::{AppError, AppResult};

/// Vector index owning all policy chunks and their embeddings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyIndex {
    /// Embedding provider the index was built with
    provider: String,

    /// Embedding model the index was built with
    model: String,

    /// Embedding vector dimension
    dimensions: usize,

    /// All chunks with their embeddings, in document order
    chunks: Vec<PolicyChunk>,
}

impl PolicyIndex {
    /// Build the index: embed every chunk and store the vectors.
    pub async fn build(
        chunks: Vec<PolicyChunk>,
        provider: &dyn EmbeddingProvider,
    ) -> AppResult<Self> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = provider.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(AppError::Upstream(format!(
                "Embedding call returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let mut chunks = chunks;
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            if embedding.len() != provider.dimensions() {
                return Err(AppError::Upstream(format!(
                    "Embedding call returned {} dimensions for chunk {}, expected {}",
                    embedding.len(),
                    chunk.seq,
                    provider.dimensions()
                )));
            }
            chunk.embedding = Some(embedding);
        }

        tracing::info!(
            "Built policy index: {} chunks, {} dimensions ({}:{})",
            chunks.len(),
            provider.dimensions(),
            provider.provider_name(),
            provider.model_name()
        );

        Ok(Self {
            provider: provider.provider_name().to_string(),
            model: provider.model_name().to_string(),
            dimensions: provider.dimensions(),
            chunks,
        })
    }

    /// Retrieve the top-k chunks most similar to the query.
    ///
    /// `k` must be at least 1. The query is embedded with the same provider
    /// the index was built with; a different provider is a configuration
    /// error. An empty index yields an empty result, not an error. Results
    /// are ordered by descending similarity, ties broken by ascending
    /// chunk sequence.
    pub async fn retrieve(
        &self,
        query: &str,
        k: usize,
        provider: &dyn EmbeddingProvider,
    ) -> AppResult<RetrievalResult> {
        if k == 0 {
            return Err(AppError::InvalidArgument(
                "Retrieval k must be at least 1".to_string(),
            ));
        }

        self.check_provider(provider)?;

        if self.chunks.is_empty() {
            tracing::debug!("Policy index is empty; returning empty retrieval");
            return Ok(RetrievalResult::default());
        }

        let query_embedding = provider.embed(query).await?;

        let mut hits: Vec<RetrievedChunk> = self
            .chunks
            .iter()
            .map(|chunk| {
                let embedding = chunk.embedding.as_deref().unwrap_or(&[]);
                RetrievedChunk {
                    chunk: chunk.clone(),
                    score: cosine_similarity(&query_embedding, embedding),
                }
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.chunk.seq.cmp(&b.chunk.seq))
        });
        hits.truncate(k);

        tracing::debug!(
            "Retrieved {} chunks (requested top-{}), best score {:.3}",
            hits.len(),
            k,
            hits.first().map(|h| h.score).unwrap_or(0.0)
        );

        Ok(RetrievalResult { hits })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True when the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Embedding dimension of the index.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Save the index snapshot to disk.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Config(format!("Failed to create index directory: {}", e))
            })?;
        }

        let blob = serde_json::to_string(self)?;
        std::fs::write(path, blob)?;

        tracing::info!("Saved policy index snapshot to {:?}", path);
        Ok(())
    }

    /// Load an index snapshot from disk.
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Data(format!(
                "Failed to read policy index snapshot {:?}: {}",
                path, e
            ))
        })?;

        let index: Self = serde_json::from_str(&contents).map_err(|e| {
            AppError::Data(format!(
                "Policy index snapshot {:?} is malformed: {}",
                path, e
            ))
        })?;

        tracing::info!(
            "Loaded policy index snapshot: {} chunks from {:?}",
            index.len(),
            path
        );
        Ok(index)
    }

    /// The query must be embedded the same way the chunks were.
    fn check_provider(&self, provider: &dyn EmbeddingProvider) -> AppResult<()> {
        if provider.provider_name() != self.provider
            || provider.model_name() != self.model
            || provider.dimensions() != self.dimensions
        {
            return Err(AppError::Config(format!(
                "Index was built with {}:{} ({} dims) but queried with {}:{} ({} dims); rebuild the index",
                self.provider,
                self.model,
                self.dimensions,
                provider.provider_name(),
                provider.model_name(),
                provider.dimensions()
            )));
        }
        Ok(())
    }
}

/// Cosine similarity between two vectors; 0.0 when either is zero-length
/// or zero-norm.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
