//! A persona bound to the shared model capability.

use std::sync::Arc;

use squad_common::{ImageAttachment, Result};
use squad_llm::{LlmClient, LlmRequest, SearchTool};
use tracing::{info, warn};

use crate::persona::Persona;

/// One member of the squad: fixed instructions, the shared model client,
/// and optionally a web-search tool for outside context.
///
/// Immutable after construction; invocations may run concurrently.
pub struct PersonaAgent {
    persona: Persona,
    client: Arc<dyn LlmClient>,
    search_tool: Option<Arc<dyn SearchTool>>,
}

impl PersonaAgent {
    pub fn new(persona: Persona, client: Arc<dyn LlmClient>) -> Self {
        Self {
            persona,
            client,
            search_tool: None,
        }
    }

    pub fn with_search_tool(mut self, tool: Arc<dyn SearchTool>) -> Self {
        self.search_tool = Some(tool);
        self
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn name(&self) -> &'static str {
        self.persona.display_name()
    }

    pub fn has_search_tool(&self) -> bool {
        self.search_tool.is_some()
    }

    /// Invoke the persona on raw user text and return the model's reply.
    ///
    /// When a search tool is attached, its results are appended to the
    /// prompt as background context. Search failure is logged and skipped;
    /// only the model call itself can fail the invocation.
    pub async fn invoke(&self, user_text: &str, images: &[ImageAttachment]) -> Result<String> {
        info!(
            persona = %self.persona,
            agent = self.name(),
            chars = user_text.len(),
            images = images.len(),
            "Invoking persona agent"
        );

        let prompt = match self.gather_context(user_text).await {
            Some(context) => format!("{user_text}\n\nBackground search results:\n{context}"),
            None => user_text.to_string(),
        };

        let request = LlmRequest::one_shot(self.persona.instructions(), prompt, images.to_vec());
        let response = self.client.complete(request).await?;
        Ok(response.content)
    }

    async fn gather_context(&self, user_text: &str) -> Option<String> {
        let tool = self.search_tool.as_ref()?;

        match tool.search(user_text).await {
            Ok(results) if !results.is_empty() => Some(
                results
                    .iter()
                    .map(|r| format!("- {}", r.snippet))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Ok(_) => None,
            Err(e) => {
                warn!(
                    persona = %self.persona,
                    tool = tool.name(),
                    error = %e,
                    "Search tool failed, continuing without context"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use squad_common::SquadError;
    use squad_llm::{LlmResponse, SearchResult};
    use std::sync::Mutex;

    /// Mock client that records the request it received.
    struct RecordingClient {
        reply: String,
        seen: Mutex<Vec<LlmRequest>>,
    }

    impl RecordingClient {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for RecordingClient {
        async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(LlmResponse {
                content: self.reply.clone(),
                model: "test".to_string(),
                usage: None,
                finish_reason: None,
            })
        }
        fn model_name(&self) -> &str {
            "test"
        }
    }

    struct FixedSearch {
        results: Vec<SearchResult>,
    }

    #[async_trait]
    impl SearchTool for FixedSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
            Ok(self.results.clone())
        }
        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl SearchTool for FailingSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
            Err(SquadError::Agent("search backend down".into()))
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn name_matches_persona_display_name() {
        let client = Arc::new(RecordingClient::new("unused"));
        for persona in Persona::ALL {
            let agent = PersonaAgent::new(persona, client.clone());
            assert_eq!(agent.name(), persona.display_name());
        }
    }

    #[tokio::test]
    async fn invoke_sends_instructions_as_system_prompt() {
        let client = Arc::new(RecordingClient::new("I hear you."));
        let agent = PersonaAgent::new(Persona::Therapist, client.clone());

        let reply = agent.invoke("She left on Tuesday", &[]).await.unwrap();
        assert_eq!(reply, "I hear you.");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].system_prompt.as_deref(),
            Some(Persona::Therapist.instructions())
        );
        assert_eq!(seen[0].messages[0].content, "She left on Tuesday");
    }

    #[tokio::test]
    async fn search_results_are_appended_to_prompt() {
        let client = Arc::new(RecordingClient::new("Here is the truth."));
        let agent = PersonaAgent::new(Persona::Honesty, client.clone()).with_search_tool(Arc::new(
            FixedSearch {
                results: vec![SearchResult {
                    title: "Attachment styles".to_string(),
                    snippet: "Anxious attachment drives reassurance-seeking.".to_string(),
                }],
            },
        ));

        agent.invoke("Why do I keep texting her?", &[]).await.unwrap();

        let seen = client.seen.lock().unwrap();
        let prompt = &seen[0].messages[0].content;
        assert!(prompt.starts_with("Why do I keep texting her?"));
        assert!(prompt.contains("Background search results:"));
        assert!(prompt.contains("Anxious attachment"));
    }

    #[tokio::test]
    async fn search_failure_is_swallowed() {
        let client = Arc::new(RecordingClient::new("Blunt answer."));
        let agent =
            PersonaAgent::new(Persona::Honesty, client.clone()).with_search_tool(Arc::new(FailingSearch));

        let reply = agent.invoke("Am I the problem?", &[]).await.unwrap();
        assert_eq!(reply, "Blunt answer.");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0].messages[0].content, "Am I the problem?");
    }

    #[tokio::test]
    async fn images_are_forwarded() {
        let client = Arc::new(RecordingClient::new("ok"));
        let agent = PersonaAgent::new(Persona::Therapist, client.clone());
        let images = vec![ImageAttachment {
            name: "chat.png".to_string(),
            content: "aGVsbG8=".to_string(),
            content_type: "image/png".to_string(),
        }];

        agent.invoke("Look at this", &images).await.unwrap();

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0].images.len(), 1);
        assert_eq!(seen[0].images[0].name, "chat.png");
    }
}
