//! LLM provider factory.
//!
//! Creates text-generation clients from the configured provider name.

use crate::client::LlmClient;
use crate::providers::OllamaClient;
use std::sync::Arc;
use wayfinder_core::{AppError, AppResult};

/// Create a text-generation client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier (currently "ollama")
/// * `endpoint` - Optional custom endpoint URL
///
/// # Errors
/// Returns a configuration error if the provider is unknown.
pub fn create_client(provider: &str, endpoint: Option<&str>) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "ollama" => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            let client = OllamaClient::with_base_url(base_url);
            Ok(Arc::new(client))
        }
        _ => Err(AppError::Config(format!(
            "Unknown provider: {}. Supported providers: ollama",
            provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_client() {
        let client = create_client("ollama", None);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().provider_name(), "ollama");
    }

    #[test]
    fn test_create_ollama_with_custom_endpoint() {
        let client = create_client("ollama", Some("http://localhost:8080"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("groq", None) {
            Err(err) => assert!(err.to_string().contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
