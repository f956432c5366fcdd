//! Policy knowledge base for the Wayfinder CLI.
//!
//! Retrieval-augmented answering over the travel policy documents:
//! - `source`: loads the policy document blob(s)
//! - `chunker`: splits the document into overlapping chunks
//! - `embeddings`: opaque text -> vector providers
//! - `index`: in-memory vector index with wholesale rebuild
//! - `answer`: grounded prompt + opaque text-generation call
//!
//! The index is built once and read many times; the two top-level
//! operations below compose the pipeline for callers.

pub mod answer;
pub mod chunker;
pub mod embeddings;
pub mod index;
pub mod source;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use index::PolicyIndex;
pub use types::{PolicyChunk, RetrievalResult, RetrievedChunk};

use wayfinder_core::AppResult;
use wayfinder_llm::LlmClient;

/// Chunk a policy document and build the vector index over it.
///
/// This is the wholesale rebuild path: any document change goes through
/// here again; there is no incremental update.
pub async fn build_policy_index(
    document: &str,
    width: usize,
    overlap: usize,
    provider: &dyn EmbeddingProvider,
) -> AppResult<PolicyIndex> {
    let chunks = chunker::chunk(document, width, overlap)?;
    tracing::info!("Chunked policy document into {} chunks", chunks.len());

    PolicyIndex::build(chunks, provider).await
}

/// A grounded answer together with the retrieval that produced it.
#[derive(Debug, Clone)]
pub struct PolicyAnswer {
    /// Generated answer text, returned unmodified from the LLM
    pub answer: String,

    /// The chunks the answer was grounded in
    pub retrieved: RetrievalResult,
}

/// Answer a policy question: retrieve relevant chunks, then synthesize a
/// grounded answer.
pub async fn policy_answer(
    index: &PolicyIndex,
    query: &str,
    top_k: usize,
    embedder: &dyn EmbeddingProvider,
    client: &dyn LlmClient,
    model: &str,
) -> AppResult<PolicyAnswer> {
    let retrieved = index.retrieve(query, top_k, embedder).await?;

    if retrieved.is_empty() {
        tracing::info!("No chunks retrieved for policy query");
    }

    let answer = answer::synthesize(query, &retrieved, client, model).await?;

    Ok(PolicyAnswer { answer, retrieved })
}
