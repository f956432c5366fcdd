//! Chat command handler: the capability dispatcher.
//!
//! Thin routing between the two engines. A query mentioning a policy cue
//! goes to the policy knowledge base; everything else goes to flight
//! search. The cue table is the whole routing contract; there is no
//! conversational state here.

use clap::Args;
use wayfinder_core::{AppConfig, AppResult};

use super::{FlightsCommand, PolicyCommand};

/// Tokens that route a query to the policy engine. Matched as whole
/// tokens, so "refundable flights" still routes to flight search while
/// "refund policy" does not.
const POLICY_CUES: &[&str] = &[
    "visa",
    "visas",
    "passport",
    "passports",
    "policy",
    "policies",
    "refund",
    "refunds",
    "cancellation",
    "insurance",
    "transit",
    "requirement",
    "requirements",
    "allowance",
    "baggage",
    "benefit",
    "benefits",
];

/// Which engine handles a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Flights,
    Policy,
}

/// Route a free-text question to the right capability
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// The travel question
    pub message: String,

    /// Maximum number of flight results to display
    #[arg(long, default_value = "5")]
    pub max_results: usize,

    /// Number of chunks to retrieve for policy questions
    #[arg(long)]
    pub top_k: Option<usize>,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let capability = route(&self.message);
        tracing::info!("Dispatching query to {:?} capability", capability);

        match capability {
            Capability::Policy => {
                PolicyCommand {
                    question: self.message.clone(),
                    top_k: self.top_k,
                    json: false,
                }
                .execute(config)
                .await
            }
            Capability::Flights => FlightsCommand {
                query: self.message.clone(),
                max_results: self.max_results,
                json: false,
            }
            .execute(config),
        }
    }
}

/// Decide which capability handles the query.
pub fn route(text: &str) -> Capability {
    let lower = text.to_lowercase();
    let is_policy = lower
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| c.is_ascii_punctuation()))
        .any(|token| POLICY_CUES.contains(&token));

    if is_policy {
        Capability::Policy
    } else {
        Capability::Flights
    }
}
