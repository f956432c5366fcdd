//! Flights command handler.
//!
//! Composes criteria extraction and the filter/rank engine over the static
//! catalog.

use chrono::Utc;
use clap::Args;
use wayfinder_core::{AppConfig, AppResult};
use wayfinder_flights::{flight_search, format, CriteriaExtractor, FlightCatalog};

/// Search flights from a free-text query
#[derive(Args, Debug)]
pub struct FlightsCommand {
    /// Free-text flight query (destination, month, alliance, price, ...)
    pub query: String,

    /// Maximum number of results to display
    #[arg(long, default_value = "5")]
    pub max_results: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl FlightsCommand {
    /// Execute the flights command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing flights command");

        let catalog = FlightCatalog::load(&config.catalog_file())?;
        let extractor = CriteriaExtractor::new(&catalog);
        let today = Utc::now().date_naive();

        let results = flight_search(&catalog, &extractor, &self.query, today);

        if self.json {
            let output = serde_json::json!({
                "query": self.query,
                "matches": results.len(),
                "flights": results,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            // An empty result is a valid outcome and gets its own message
            println!("{}", format::format_flight_list(&results, self.max_results));
        }

        Ok(())
    }
}
