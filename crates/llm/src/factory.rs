//! LLM provider factory.
//!
//! Resolves a provider name plus optional endpoint and secret into a shared
//! client. `Ok(None)` means generation is deliberately disabled.

use crate::client::LlmClient;
use crate::providers::{GeminiClient, OllamaClient};
use crate::types::{ProviderType, DEFAULT_OLLAMA_ENDPOINT};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("gemini", "ollama", "none")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - Optional API key (for providers that require it)
///
/// # Errors
/// Returns error if the provider is unknown or a required secret is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<Option<Arc<dyn LlmClient>>, String> {
    let provider_type =
        ProviderType::parse(provider).ok_or_else(|| format!("Unknown provider: {}", provider))?;

    match provider_type {
        ProviderType::Ollama => {
            let base_url = endpoint.unwrap_or(DEFAULT_OLLAMA_ENDPOINT);
            Ok(Some(Arc::new(OllamaClient::with_base_url(base_url))))
        }
        ProviderType::Gemini => {
            let api_key = api_key
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| "Gemini provider requires API key".to_string())?;
            let client = match endpoint {
                Some(base_url) => GeminiClient::with_base_url(api_key, base_url),
                None => GeminiClient::new(api_key),
            };
            Ok(Some(Arc::new(client)))
        }
        ProviderType::Disabled => Ok(None),
    }
}
