//! Grounded answer synthesis.
//!
//! Builds the grounded prompt from the retrieved chunks and delegates to
//! the opaque text-generation call. The generated text comes back to the
//! caller unmodified; generation failures propagate as upstream errors.

use crate::types::RetrievalResult;
use wayfinder_core::AppResult;
use wayfinder_llm::{LlmClient, LlmRequest};

/// Temperature for factual, grounded answering.
const ANSWER_TEMPERATURE: f32 = 0.3;

/// Response length cap.
const ANSWER_MAX_TOKENS: u32 = 1000;

/// Generate a grounded answer for the query from the retrieved chunks.
///
/// An empty retrieval still issues a generation request; the prompt then
/// states that no context was found, so the answer reflects that
/// limitation instead of fabricating one.
pub async fn synthesize(
    query: &str,
    retrieved: &RetrievalResult,
    client: &dyn LlmClient,
    model: &str,
) -> AppResult<String> {
    let passages = retrieved.passages();
    let prompt = wayfinder_prompt::build_grounded_prompt(query, &passages)?;

    tracing::debug!(
        "Synthesizing answer from {} passages via {}",
        passages.len(),
        client.provider_name()
    );

    let request = LlmRequest::new(prompt.user, model)
        .with_system(prompt.system)
        .with_temperature(ANSWER_TEMPERATURE)
        .with_max_tokens(ANSWER_MAX_TOKENS);

    let response = client.complete(&request).await?;
    Ok(response.content)
}
