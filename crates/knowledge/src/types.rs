//! Knowledge system type definitions.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An immutable span of the policy document.
///
/// `seq` is the stable position of the chunk within its source document;
/// `start`/`end` are byte offsets into the original text, aligned to char
/// boundaries. The embedding is filled in when the index is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyChunk {
    /// Position within the source document (0-indexed)
    pub seq: u32,

    /// Byte offset of the span start in the original document
    pub start: usize,

    /// Byte offset one past the span end
    pub end: usize,

    /// Chunk text content
    pub text: String,

    /// SHA-256 hash of the chunk text
    pub hash: String,

    /// Embedding vector, computed at index build
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl PolicyChunk {
    /// Create a chunk for a document span. The hash is derived from the
    /// text, so identical input always yields an identical chunk.
    pub fn new(seq: u32, start: usize, end: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let hash = content_hash(&text);

        Self {
            seq,
            start,
            end,
            text,
            hash,
            embedding: None,
        }
    }
}

/// SHA-256 hex digest of a text.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A retrieved chunk with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub chunk: PolicyChunk,
    pub score: f32,
}

/// Ordered retrieval output: at most top-k chunks, descending score, ties
/// broken by ascending chunk sequence so retrieval stays deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub hits: Vec<RetrievedChunk>,
}

impl RetrievalResult {
    /// Number of retrieved chunks.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// True when nothing was retrieved.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Chunk texts in retrieval order.
    pub fn passages(&self) -> Vec<String> {
        self.hits.iter().map(|hit| hit.chunk.text.clone()).collect()
    }
}
