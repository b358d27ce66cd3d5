//! The squad session: lazy one-time initialization, single-agent and
//! full-report runners, and the top-level handler.

use std::sync::Arc;

use squad_agents::{Persona, PersonaAgent};
use squad_common::{ChatMessage, ImageAttachment, Result, SquadError};
use squad_llm::{build_llm_client, DuckDuckGoSearch, LlmClient};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::config::SquadConfig;
use crate::report::{clean_text, compose_report, AGENT_ERROR_PLACEHOLDER};
use crate::routing::{select_mode, DispatchMode};

/// Fixed reply for an empty message list.
pub const PROMPT_FOR_INPUT: &str = "Please tell me what happened.";

/// The four constructed agents. Built once per session, read-only after.
pub struct AgentRegistry {
    agents: [PersonaAgent; 4],
    memory_enabled: bool,
}

impl AgentRegistry {
    /// Build the registry on a caller-supplied model client.
    ///
    /// The web-search tool is attached to the honesty persona only.
    pub fn from_client(client: Arc<dyn LlmClient>, memory_enabled: bool) -> Self {
        let agents = Persona::ALL.map(|persona| {
            let agent = PersonaAgent::new(persona, client.clone());
            if persona == Persona::Honesty {
                agent.with_search_tool(Arc::new(DuckDuckGoSearch::new()))
            } else {
                agent
            }
        });

        Self {
            agents,
            memory_enabled,
        }
    }

    /// Build the registry from config. Fails with a configuration error when
    /// no model credential is available.
    pub fn from_config(config: &SquadConfig) -> Result<Self> {
        let client = build_llm_client(&config.provider)?;
        info!(model = client.model_name(), "Using OpenRouter model");

        let memory_key = config.memory.resolve_api_key();
        if memory_key.is_some() {
            info!("Memory service credential present");
        }

        Ok(Self::from_client(client, memory_key.is_some()))
    }

    pub fn get(&self, persona: Persona) -> &PersonaAgent {
        // Persona::ALL is declaration order, so the index matches.
        let index = Persona::ALL
            .iter()
            .position(|p| *p == persona)
            .expect("persona is one of the four");
        &self.agents[index]
    }

    pub fn memory_enabled(&self) -> bool {
        self.memory_enabled
    }
}

/// Owns the initialization state and dispatches user turns to the agents.
///
/// The hosting process creates one session per process lifetime and calls
/// [`Session::handle`] per user turn.
pub struct Session {
    config: SquadConfig,

    /// `None` until the first successful initialization; the mutex guards
    /// the check-then-act so racing first requests build the registry once.
    registry: Mutex<Option<Arc<AgentRegistry>>>,

    /// Test/embedding hook: when set, initialization binds the agents to
    /// this client instead of building one from config.
    client_override: Option<Arc<dyn LlmClient>>,
}

impl Session {
    pub fn new(config: SquadConfig) -> Self {
        Self {
            config,
            registry: Mutex::new(None),
            client_override: None,
        }
    }

    /// Create a session bound to an explicit model client, bypassing
    /// provider config and credential resolution.
    pub fn with_client(config: SquadConfig, client: Arc<dyn LlmClient>) -> Self {
        Self {
            config,
            registry: Mutex::new(None),
            client_override: Some(client),
        }
    }

    /// Idempotent, race-safe initialization.
    ///
    /// All concurrent callers block on the same mutex; the first builds the
    /// registry, the rest observe it. On failure the slot stays empty so a
    /// later call may retry.
    pub async fn ensure_initialized(&self) -> Result<Arc<AgentRegistry>> {
        let mut guard = self.registry.lock().await;
        if let Some(ref registry) = *guard {
            return Ok(registry.clone());
        }

        let registry = match self.client_override {
            Some(ref client) => AgentRegistry::from_client(
                client.clone(),
                self.config.memory.resolve_api_key().is_some(),
            ),
            None => AgentRegistry::from_config(&self.config)?,
        };

        let registry = Arc::new(registry);
        *guard = Some(registry.clone());
        info!("Breakup Recovery Squad initialized");
        Ok(registry)
    }

    pub async fn is_initialized(&self) -> bool {
        self.registry.lock().await.is_some()
    }

    async fn registry(&self) -> Result<Arc<AgentRegistry>> {
        self.registry
            .lock()
            .await
            .clone()
            .ok_or(SquadError::NotInitialized)
    }

    /// Invoke exactly one persona and return its normalized reply.
    ///
    /// Errors with [`SquadError::NotInitialized`] when called before
    /// initialization; `handle` never hits that path because it always
    /// initializes first.
    pub async fn run_single_agent(
        &self,
        persona: Persona,
        user_text: &str,
        images: &[ImageAttachment],
    ) -> Result<String> {
        let registry = self.registry().await?;
        invoke_single(&registry, persona, user_text, images).await
    }

    /// Fan the user text out to all four personas concurrently and compose
    /// the fixed-order report. A failing persona degrades to a placeholder
    /// section; only a missing registry is an error.
    pub async fn run_full_report(
        &self,
        user_text: &str,
        images: &[ImageAttachment],
    ) -> Result<String> {
        let registry = self.registry().await?;
        Ok(full_report(&registry, user_text, images).await)
    }

    /// Top-level entry point: initialize, route, dispatch.
    ///
    /// Never returns an error; every failure is rendered as user-facing
    /// text so the calling UI always receives a string.
    pub async fn handle(&self, messages: &[ChatMessage]) -> String {
        let registry = match self.ensure_initialized().await {
            Ok(registry) => registry,
            Err(e) => {
                error!(error = %e, "Squad initialization failed");
                return format!("Squad initialization failed: {e}");
            }
        };

        let decision = select_mode(messages);

        match decision.mode {
            DispatchMode::Prompt => PROMPT_FOR_INPUT.to_string(),
            DispatchMode::Chat(persona) => {
                match invoke_single(&registry, persona, &decision.user_text, &decision.images)
                    .await
                {
                    Ok(reply) => reply,
                    Err(e) => {
                        error!(persona = %persona, error = %e, "Agent invocation failed");
                        format!("Agent error: {e}")
                    }
                }
            }
            DispatchMode::FullReport => {
                full_report(&registry, &decision.user_text, &decision.images).await
            }
        }
    }
}

async fn invoke_single(
    registry: &AgentRegistry,
    persona: Persona,
    user_text: &str,
    images: &[ImageAttachment],
) -> Result<String> {
    let reply = registry.get(persona).invoke(user_text, images).await?;
    Ok(clean_text(&reply))
}

/// Concurrent four-way fan-out with positional collection.
///
/// `tokio::join!` issues all four calls at once and never cancels a sibling
/// on failure, so total latency tracks the slowest call and section order is
/// independent of completion order.
async fn full_report(registry: &AgentRegistry, user_text: &str, images: &[ImageAttachment]) -> String {
    let results = tokio::join!(
        registry.get(Persona::Therapist).invoke(user_text, images),
        registry.get(Persona::Closure).invoke(user_text, images),
        registry.get(Persona::Planner).invoke(user_text, images),
        registry.get(Persona::Honesty).invoke(user_text, images),
    );

    let results = [results.0, results.1, results.2, results.3];
    let mut sections: [String; 4] = Default::default();
    for ((persona, result), section) in Persona::ALL.iter().zip(results).zip(sections.iter_mut()) {
        *section = match result {
            Ok(text) => clean_text(&text),
            Err(e) => {
                warn!(persona = %persona, error = %e, "Section degraded to placeholder");
                AGENT_ERROR_PLACEHOLDER.to_string()
            }
        };
    }

    compose_report(&sections)
}
