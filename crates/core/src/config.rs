//! Configuration management for the Wayfinder CLI.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (.wayfinder/config.yaml)
//!
//! The configuration is workspace-centric: the flight catalog and policy
//! document live under the workspace, and derived state (the policy index
//! snapshot) is stored in `.wayfinder/`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .wayfinder/ and data/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Text-generation provider (currently "ollama")
    pub provider: String,

    /// Model identifier for text generation
    pub model: String,

    /// Custom endpoint for the generation provider
    pub endpoint: Option<String>,

    /// Path to the flight catalog JSON, relative to the workspace
    pub catalog_path: PathBuf,

    /// Path to the policy document (file or directory), relative to the
    /// workspace
    pub policy_path: PathBuf,

    /// Chunking parameters for the policy document
    pub chunking: ChunkingSettings,

    /// Number of chunks to retrieve per policy query
    pub top_k: usize,

    /// Embedding provider settings
    pub embedding: EmbeddingSettings,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Chunk width/overlap used when splitting the policy document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingSettings {
    /// Maximum chunk size in bytes
    pub width: usize,

    /// Shared bytes between consecutive chunks
    pub overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            width: 500,
            overlap: 50,
        }
    }
}

/// Embedding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Provider identifier ("trigram" or "ollama")
    pub provider: String,

    /// Embedding model identifier
    pub model: String,

    /// Embedding vector dimension
    pub dimensions: usize,

    /// Custom endpoint for remote embedding providers
    pub endpoint: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
            endpoint: None,
        }
    }
}

/// Full configuration file structure (.wayfinder/config.yaml).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    data: Option<DataSection>,
    retrieval: Option<RetrievalSection>,
    embedding: Option<EmbeddingSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DataSection {
    catalog: Option<String>,
    #[serde(rename = "policyDocument")]
    policy_document: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrievalSection {
    #[serde(rename = "chunkWidth")]
    chunk_width: Option<usize>,
    #[serde(rename = "chunkOverlap")]
    chunk_overlap: Option<usize>,
    #[serde(rename = "topK")]
    top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmbeddingSection {
    provider: Option<String>,
    model: Option<String>,
    dimensions: Option<usize>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "ollama".to_string(), // Local-first default
            model: "llama3.2".to_string(),
            endpoint: None,
            catalog_path: PathBuf::from("data/flights.json"),
            policy_path: PathBuf::from("data/visa_rules.md"),
            chunking: ChunkingSettings::default(),
            top_k: 3,
            embedding: EmbeddingSettings::default(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `WAYFINDER_WORKSPACE`: Override workspace path
    /// - `WAYFINDER_CONFIG`: Path to config file
    /// - `WAYFINDER_PROVIDER`: Text-generation provider
    /// - `WAYFINDER_MODEL`: Model identifier
    /// - `WAYFINDER_ENDPOINT`: Provider endpoint
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("WAYFINDER_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("WAYFINDER_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.workspace.join(".wayfinder/config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("WAYFINDER_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("WAYFINDER_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("WAYFINDER_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(endpoint) = llm.endpoint {
                result.endpoint = Some(endpoint);
            }
        }

        if let Some(data) = config_file.data {
            if let Some(catalog) = data.catalog {
                result.catalog_path = PathBuf::from(catalog);
            }
            if let Some(policy) = data.policy_document {
                result.policy_path = PathBuf::from(policy);
            }
        }

        if let Some(retrieval) = config_file.retrieval {
            if let Some(width) = retrieval.chunk_width {
                result.chunking.width = width;
            }
            if let Some(overlap) = retrieval.chunk_overlap {
                result.chunking.overlap = overlap;
            }
            if let Some(top_k) = retrieval.top_k {
                result.top_k = top_k;
            }
        }

        if let Some(embedding) = config_file.embedding {
            if let Some(provider) = embedding.provider {
                result.embedding.provider = provider;
            }
            if let Some(model) = embedding.model {
                result.embedding.model = model;
            }
            if let Some(dimensions) = embedding.dimensions {
                result.embedding.dimensions = dimensions;
            }
            if let Some(endpoint) = embedding.endpoint {
                result.embedding.endpoint = Some(endpoint);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the
    /// config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .wayfinder state directory.
    pub fn state_dir(&self) -> PathBuf {
        self.workspace.join(".wayfinder")
    }

    /// Ensure the .wayfinder state directory exists.
    pub fn ensure_state_dir(&self) -> AppResult<()> {
        let state_dir = self.state_dir();
        if !state_dir.exists() {
            std::fs::create_dir_all(&state_dir).map_err(|e| {
                AppError::Config(format!("Failed to create .wayfinder directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Path of the policy index snapshot.
    pub fn index_path(&self) -> PathBuf {
        self.state_dir().join("index.json")
    }

    /// Catalog path resolved against the workspace.
    pub fn catalog_file(&self) -> PathBuf {
        self.resolve(&self.catalog_path)
    }

    /// Policy document path resolved against the workspace.
    pub fn policy_file(&self) -> PathBuf {
        self.resolve(&self.policy_path)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Validate the configuration before running a command.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["ollama"];
        if !known_providers.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        let known_embedders = ["trigram", "ollama"];
        if !known_embedders.contains(&self.embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding.provider,
                known_embedders.join(", ")
            )));
        }

        if self.chunking.width == 0 {
            return Err(AppError::Config(
                "Chunk width must be positive".to_string(),
            ));
        }

        if self.chunking.overlap >= self.chunking.width {
            return Err(AppError::Config(format!(
                "Chunk overlap ({}) must be smaller than chunk width ({})",
                self.chunking.overlap, self.chunking.width
            )));
        }

        if self.top_k == 0 {
            return Err(AppError::Config(
                "Retrieval topK must be at least 1".to_string(),
            ));
        }

        if self.embedding.dimensions == 0 {
            return Err(AppError::Config(
                "Embedding dimensions must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
