//! Configuration for the recovery squad.
//!
//! Loaded from a TOML file at the binary edge; every field has a default so
//! the squad runs from an empty config plus the `OPENROUTER_API_KEY`
//! environment variable.

use serde::{Deserialize, Serialize};
use squad_llm::ProviderConfig;
use tracing::warn;

/// Top-level squad configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SquadConfig {
    /// Model provider (OpenRouter)
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Optional secondary memory service; purely additive
    #[serde(default)]
    pub memory: MemoryConfig,

    /// HTTP deployment settings
    #[serde(default)]
    pub deployment: DeploymentConfig,
}

/// Optional memory-service credential. Absence changes nothing beyond
/// omitting the capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl MemoryConfig {
    /// Resolve the memory credential from config or the `MEM0_API_KEY`
    /// environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("MEM0_API_KEY").ok().filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    3773
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl SquadConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;

        if config.provider.api_key.is_some() {
            warn!(
                "API key found in config file '{}'. For better security, \
                 use the OPENROUTER_API_KEY environment variable instead.",
                path.display()
            );
        }

        Ok(config)
    }
}
