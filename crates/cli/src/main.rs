//! Wayfinder CLI
//!
//! Main entry point for the wayfinder command-line tool.
//! Answers natural-language travel questions with a flight-search engine
//! and a retrieval-augmented policy knowledge base.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ChatCommand, FlightsCommand, LearnCommand, PolicyCommand, StatsCommand};
use std::path::PathBuf;
use wayfinder_core::{config::AppConfig, logging, AppResult};

/// Wayfinder CLI - flight search and travel policy answers
#[derive(Parser, Debug)]
#[command(name = "wayfinder")]
#[command(about = "Flight search and travel policy answers", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "WAYFINDER_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "WAYFINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Text-generation provider (ollama)
    #[arg(short, long, global = true, env = "WAYFINDER_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "WAYFINDER_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search flights from a free-text query
    Flights(FlightsCommand),

    /// Answer a travel policy question from the knowledge base
    Policy(PolicyCommand),

    /// Route a free-text question to the right capability
    Chat(ChatCommand),

    /// Rebuild the policy index from the policy documents
    Learn(LearnCommand),

    /// Show catalog and index statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Wayfinder CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    // Bad chunking/index parameters are fatal at startup
    config.validate()?;

    let command_name = match &cli.command {
        Commands::Flights(_) => "flights",
        Commands::Policy(_) => "policy",
        Commands::Chat(_) => "chat",
        Commands::Learn(_) => "learn",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Flights(cmd) => cmd.execute(&config),
        Commands::Policy(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Learn(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
