//! Command handlers for the Wayfinder CLI.

pub mod chat;
pub mod flights;
pub mod learn;
pub mod policy;
pub mod stats;

// Re-export command types for convenience
pub use chat::ChatCommand;
pub use flights::FlightsCommand;
pub use learn::LearnCommand;
pub use policy::PolicyCommand;
pub use stats::StatsCommand;

use wayfinder_core::AppConfig;
use wayfinder_knowledge::EmbeddingConfig;

/// Map the app-level embedding settings to the knowledge crate's config.
pub(crate) fn embedding_config(config: &AppConfig) -> EmbeddingConfig {
    EmbeddingConfig {
        provider: config.embedding.provider.clone(),
        model: config.embedding.model.clone(),
        dimensions: config.embedding.dimensions,
        endpoint: config.embedding.endpoint.clone(),
    }
}
