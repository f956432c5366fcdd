//! Learn command handler.
//!
//! Wholesale rebuild of the policy index: load the policy document blob,
//! chunk it, embed every chunk, and save the snapshot.

use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use wayfinder_core::{AppConfig, AppResult};
use wayfinder_knowledge::{build_policy_index, create_provider, source};

/// Rebuild the policy index from the policy documents
#[derive(Args, Debug)]
pub struct LearnCommand {
    /// Policy document file or directory (default from config)
    #[arg(long)]
    pub source: Option<PathBuf>,
}

impl LearnCommand {
    /// Execute the learn command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let start = Instant::now();

        let source_path = self.source.clone().unwrap_or_else(|| config.policy_file());
        tracing::info!("Rebuilding policy index from {:?}", source_path);

        let document = source::load_policy_document(&source_path)?;
        let embedder = create_provider(&super::embedding_config(config))?;

        let index = build_policy_index(
            &document,
            config.chunking.width,
            config.chunking.overlap,
            embedder.as_ref(),
        )
        .await?;

        config.ensure_state_dir()?;
        index.save(&config.index_path())?;

        println!(
            "Indexed {} chunks from {:?} in {:.2}s",
            index.len(),
            source_path,
            start.elapsed().as_secs_f64()
        );

        Ok(())
    }
}
