//! Policy command handler.
//!
//! Composes retrieval over the policy index and grounded answer synthesis.

use clap::Args;
use wayfinder_core::{AppConfig, AppError, AppResult};
use wayfinder_knowledge::{create_provider, policy_answer, PolicyIndex};
use wayfinder_llm::create_client;

/// Answer a travel policy question from the knowledge base
#[derive(Args, Debug)]
pub struct PolicyCommand {
    /// The policy question to answer
    pub question: String,

    /// Number of chunks to retrieve (default from config)
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PolicyCommand {
    /// Execute the policy command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing policy command");

        let index_path = config.index_path();
        if !index_path.exists() {
            return Err(AppError::Config(format!(
                "No policy index found at {:?}. Run 'wayfinder learn' first.",
                index_path
            )));
        }

        let index = PolicyIndex::load(&index_path)?;
        let embedder = create_provider(&super::embedding_config(config))?;
        let client = create_client(&config.provider, config.endpoint.as_deref())?;
        let top_k = self.top_k.unwrap_or(config.top_k);

        let result = policy_answer(
            &index,
            &self.question,
            top_k,
            embedder.as_ref(),
            client.as_ref(),
            &config.model,
        )
        .await?;

        if self.json {
            let output = serde_json::json!({
                "question": self.question,
                "answer": result.answer,
                "passages": result
                    .retrieved
                    .hits
                    .iter()
                    .map(|hit| {
                        serde_json::json!({
                            "seq": hit.chunk.seq,
                            "score": hit.score,
                            "text": hit.chunk.text,
                        })
                    })
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", result.answer);

            // Distinguish answers with no supporting retrieval
            if result.retrieved.is_empty() {
                println!();
                println!("(no supporting passages were found in the policy knowledge base)");
            }
        }

        Ok(())
    }
}
