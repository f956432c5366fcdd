//! Trigram embedding provider for local, offline operation.

use crate::embeddings::provider::EmbeddingProvider;
use std::collections::HashMap;
use wayfinder_core::AppResult;

/// Words too common to carry signal.
const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them", "do", "does", "did", "can", "will", "what", "when",
];

/// Deterministic, content-aware embeddings from character trigrams and
/// word frequencies. Not semantically accurate like a neural model, but
/// consistent and discriminative enough for offline retrieval over a
/// small policy corpus.
#[derive(Debug)]
pub struct TrigramProvider {
    dimensions: usize,
}

impl TrigramProvider {
    /// Create a new trigram provider with specified dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];

        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 2 && !STOP_WORDS.contains(w))
            .collect();

        let mut frequencies: HashMap<&str, u32> = HashMap::new();
        for word in &words {
            *frequencies.entry(word).or_insert(0) += 1;
        }

        for (word, count) in &frequencies {
            // Character trigrams spread each word over several dimensions
            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let slot = hash_feature(window.iter().collect::<String>().as_bytes(), 37)
                    % self.dimensions as u64;
                embedding[slot as usize] += (*count as f32).sqrt();
            }

            // The whole word claims one dimension of its own
            let slot = hash_feature(word.as_bytes(), 31) % self.dimensions as u64;
            embedding[slot as usize] += *count as f32;
        }

        normalize(&mut embedding);
        embedding
    }
}

/// Fold bytes into a u64 with the given multiplier.
fn hash_feature(bytes: &[u8], multiplier: u64) -> u64 {
    bytes.iter().fold(0u64, |acc, b| {
        acc.wrapping_mul(multiplier).wrapping_add(*b as u64)
    })
}

/// Scale to a unit vector; a zero vector stays zero.
fn normalize(embedding: &mut [f32]) {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in embedding.iter_mut() {
            *value /= norm;
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dimensions_and_names() {
        let provider = TrigramProvider::new(384);
        assert_eq!(provider.dimensions(), 384);
        assert_eq!(provider.provider_name(), "trigram");
        assert_eq!(provider.model_name(), "trigram-v1");
    }

    #[tokio::test]
    async fn test_embedding_is_unit_length() {
        let provider = TrigramProvider::new(384);
        let embedding = provider.embed("visa requirements for Japan").await.unwrap();

        assert_eq!(embedding.len(), 384);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_deterministic_for_identical_input() {
        let provider = TrigramProvider::new(384);

        let first = provider.embed("refund policy details").await.unwrap();
        let second = provider.embed("refund policy details").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_different_texts_differ() {
        let provider = TrigramProvider::new(384);

        let visas = provider.embed("visa requirements").await.unwrap();
        let refunds = provider.embed("refund policies").await.unwrap();

        assert_ne!(visas, refunds);
    }

    #[tokio::test]
    async fn test_related_text_scores_higher() {
        let provider = TrigramProvider::new(384);

        let query = provider
            .embed("Do I need a visa for Japan?")
            .await
            .unwrap();
        let visa_passage = provider
            .embed("Japan visa rules: UAE passport holders may enter visa-free.")
            .await
            .unwrap();
        let refund_passage = provider
            .embed("Refundable tickets can be cancelled for a full refund.")
            .await
            .unwrap();

        let dot = |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() };

        assert!(dot(&query, &visa_passage) > dot(&query, &refund_passage));
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let provider = TrigramProvider::new(384);
        let embedding = provider.embed("").await.unwrap();

        assert_eq!(embedding.len(), 384);
        assert!(embedding.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn test_batch_matches_single() {
        let provider = TrigramProvider::new(128);
        let texts = vec!["alpha".to_string(), "beta".to_string()];

        let batch = provider.embed_batch(&texts).await.unwrap();
        let single = provider.embed("alpha").await.unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], single);
    }
}
