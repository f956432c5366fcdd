//! Grounded-answer prompt builder.
//!
//! Renders retrieved passages and the user's question into a single prompt
//! via Handlebars. The passage text is injected verbatim; delimiters keep
//! the sections apart so the model can tell context from question.

use handlebars::Handlebars;
use serde::Serialize;
use wayfinder_core::{AppError, AppResult};

/// System instruction for grounded answering.
const SYSTEM_PROMPT: &str = "You are a travel policy assistant. Answer \
questions using only the context passages provided in the prompt. Do not \
use outside knowledge and do not invent policy details. If the provided \
context is insufficient to answer, say so explicitly. Keep answers concise \
and factual.";

/// User prompt template. Passages appear in retrieval order; the empty
/// branch tells the model that retrieval found nothing, so the answer
/// reflects that limitation instead of fabricating one.
const USER_TEMPLATE: &str = "\
{{#if has_context}}Context passages:

{{#each passages}}[Passage {{number}}]
{{text}}

---

{{/each}}Question: {{query}}

Answer using only the context passages above. If they do not contain the \
answer, state that the available policy documents do not cover it.
{{else}}No relevant context was found in the policy knowledge base for \
this question.

Question: {{query}}

State that no supporting policy context was found and do not invent an \
answer.
{{/if}}";

/// A prompt ready for the text-generation call.
#[derive(Debug, Clone)]
pub struct GroundedPrompt {
    /// System instruction
    pub system: String,

    /// User message: passages + question
    pub user: String,
}

#[derive(Serialize)]
struct TemplateData {
    has_context: bool,
    passages: Vec<PassageData>,
    query: String,
}

#[derive(Serialize)]
struct PassageData {
    number: usize,
    text: String,
}

/// Build the grounded prompt for a query and its retrieved passages.
///
/// Passages must be given in retrieval order; their text is included
/// verbatim. An empty slice produces the no-context variant of the prompt.
pub fn build_grounded_prompt(query: &str, passages: &[String]) -> AppResult<GroundedPrompt> {
    tracing::debug!(
        "Building grounded prompt with {} passages",
        passages.len()
    );

    let data = TemplateData {
        has_context: !passages.is_empty(),
        passages: passages
            .iter()
            .enumerate()
            .map(|(i, text)| PassageData {
                number: i + 1,
                text: text.clone(),
            })
            .collect(),
        query: query.to_string(),
    };

    let user = render_template(USER_TEMPLATE, &data)?;

    Ok(GroundedPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    })
}

/// Render a Handlebars template with the given data.
fn render_template<T: Serialize>(template: &str, data: &T) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output, no HTML escaping
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Config(format!("Failed to register prompt template: {}", e)))?;

    handlebars
        .render("prompt", data)
        .map_err(|e| AppError::Config(format!("Failed to render prompt template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_passages_verbatim() {
        let passages = vec![
            "UAE passport holders can enter Japan visa-free for 30 days.".to_string(),
            "Schengen visas must be applied for in advance.".to_string(),
        ];

        let prompt = build_grounded_prompt("Do I need a visa for Japan?", &passages).unwrap();

        assert!(prompt.user.contains("[Passage 1]"));
        assert!(prompt.user.contains("[Passage 2]"));
        assert!(prompt.user.contains(&passages[0]));
        assert!(prompt.user.contains(&passages[1]));
        assert!(prompt.user.contains("---"));
        assert!(prompt.user.contains("Do I need a visa for Japan?"));
        assert!(prompt.user.contains("only the context passages"));
    }

    #[test]
    fn test_prompt_preserves_passage_order() {
        let passages = vec!["first passage".to_string(), "second passage".to_string()];

        let prompt = build_grounded_prompt("question", &passages).unwrap();

        let first = prompt.user.find("first passage").unwrap();
        let second = prompt.user.find("second passage").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_prompt_without_context() {
        let prompt = build_grounded_prompt("Do I need a visa?", &[]).unwrap();

        assert!(prompt.user.contains("No relevant context was found"));
        assert!(prompt.user.contains("Do I need a visa?"));
        assert!(!prompt.user.contains("[Passage"));
    }

    #[test]
    fn test_system_prompt_demands_grounding() {
        let prompt = build_grounded_prompt("q", &["p".to_string()]).unwrap();

        assert!(prompt.system.contains("only the context passages"));
        assert!(prompt.system.contains("insufficient"));
    }
}
