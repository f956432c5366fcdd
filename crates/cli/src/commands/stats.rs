//! Stats command handler.

use clap::Args;
use wayfinder_core::{AppConfig, AppResult};
use wayfinder_flights::FlightCatalog;
use wayfinder_knowledge::PolicyIndex;

/// Show catalog and index statistics
#[derive(Args, Debug)]
pub struct StatsCommand {}

impl StatsCommand {
    /// Execute the stats command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let catalog = FlightCatalog::load(&config.catalog_file())?;
        println!("Flight catalog: {} records", catalog.len());

        let index_path = config.index_path();
        if index_path.exists() {
            let index = PolicyIndex::load(&index_path)?;
            let snapshot_bytes = std::fs::metadata(&index_path).map(|m| m.len()).unwrap_or(0);
            println!(
                "Policy index:   {} chunks, {} dims, {} bytes on disk",
                index.len(),
                index.dimensions(),
                snapshot_bytes
            );
        } else {
            println!("Policy index:   not built (run 'wayfinder learn')");
        }

        Ok(())
    }
}
