use std::sync::Arc;

use serde::{Deserialize, Serialize};
use squad_common::{Result, SquadError};

use crate::client::LlmClient;
use crate::openrouter::OpenRouterClient;

pub const DEFAULT_MODEL: &str = "meta-llama/llama-3-8b-instruct";

/// Model provider configuration.
///
/// The API key may be left out of the file and supplied via the
/// `OPENROUTER_API_KEY` environment variable instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub temperature: Option<f32>,

    pub max_tokens: Option<u32>,
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_url: None,
            api_key: None,
            temperature: None,
            max_tokens: None,
        }
    }
}

impl ProviderConfig {
    /// Resolve the API key from config or the environment.
    ///
    /// Priority:
    /// 1. Explicit non-empty `api_key` in config
    /// 2. `OPENROUTER_API_KEY` environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
    }
}

/// Build the shared model client from provider config.
///
/// Fails with a configuration error when no credential is available; the
/// hosted provider rejects unauthenticated calls anyway, so this surfaces
/// the problem at initialization rather than on the first agent call.
pub fn build_llm_client(config: &ProviderConfig) -> Result<Arc<dyn LlmClient>> {
    let api_key = config
        .resolve_api_key()
        .ok_or_else(|| SquadError::Config("No API Key found".to_string()))?;

    Ok(Arc::new(OpenRouterClient::new(
        config.api_url.clone(),
        config.model.clone(),
        api_key,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML_CONFIG: &str = r#"
model = "meta-llama/llama-3-8b-instruct"
api_url = "https://openrouter.ai/api"
api_key = "sk-or-test"
"#;

    #[test]
    fn deserialize_config_from_toml() {
        let config: ProviderConfig = toml::from_str(TOML_CONFIG).unwrap();
        assert_eq!(config.model, "meta-llama/llama-3-8b-instruct");
        assert_eq!(config.api_url.as_deref(), Some("https://openrouter.ai/api"));
        assert_eq!(config.api_key.as_deref(), Some("sk-or-test"));
        assert!(config.temperature.is_none());
    }

    #[test]
    fn deserialize_config_defaults() {
        let config: ProviderConfig = toml::from_str("").unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        let config = ProviderConfig {
            api_key: Some("sk-or-explicit".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-or-explicit"));
    }

    #[test]
    fn empty_explicit_key_is_ignored() {
        let config = ProviderConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        // Falls through to the environment, which may or may not be set in
        // the test runner; either way the empty string must not be returned.
        assert_ne!(config.resolve_api_key().as_deref(), Some(""));
    }

    #[test]
    fn build_client_with_key() {
        let config = ProviderConfig {
            api_key: Some("sk-or-test".to_string()),
            ..Default::default()
        };
        let client = build_llm_client(&config).unwrap();
        assert_eq!(client.model_name(), DEFAULT_MODEL);
    }
}
