//! Model-provider abstraction for the recovery squad.
//!
//! Exposes a single capability the personas are built on: given a prompt
//! (and optional images), return a text completion. The concrete provider is
//! OpenRouter's chat-completions endpoint; agents only ever see the
//! `LlmClient` trait so tests substitute mocks freely.

pub mod client;
pub mod config;
pub mod openrouter;
pub mod search;

pub use client::{LlmClient, LlmRequest, LlmResponse, PromptMessage, Role, TokenUsage};
pub use config::{build_llm_client, ProviderConfig, DEFAULT_MODEL};
pub use openrouter::OpenRouterClient;
pub use search::{DuckDuckGoSearch, SearchResult, SearchTool};
