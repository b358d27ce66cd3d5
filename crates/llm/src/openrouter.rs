use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use squad_common::Result;
use squad_common::SquadError;
use tracing::debug;

use crate::client::{LlmClient, LlmRequest, LlmResponse, Role, TokenUsage};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api";

#[derive(Serialize)]
struct OpenRouterRequest {
    model: String,
    messages: Vec<OpenRouterMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Outbound message. Content is a plain string for text-only turns, or an
/// array of content parts when images are attached.
#[derive(Serialize, Debug, Clone)]
struct OpenRouterMessage {
    role: String,
    content: serde_json::Value,
}

#[derive(Deserialize, Debug, Clone)]
struct OpenRouterReplyMessage {
    content: String,
}

#[derive(Deserialize)]
struct OpenRouterResponse {
    choices: Vec<OpenRouterChoice>,
    model: String,
    usage: Option<OpenRouterUsage>,
}

#[derive(Deserialize)]
struct OpenRouterChoice {
    message: OpenRouterReplyMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenRouterUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

pub struct OpenRouterClient {
    base_url: String,
    model: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(base_url: Option<String>, model: String, api_key: String) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model,
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    fn role_to_string(role: &Role) -> &'static str {
        match role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    fn build_messages(request: &LlmRequest) -> Vec<OpenRouterMessage> {
        let mut messages = Vec::new();
        if let Some(ref system) = request.system_prompt {
            messages.push(OpenRouterMessage {
                role: "system".to_string(),
                content: serde_json::Value::String(system.clone()),
            });
        }

        let last_user_index = request
            .messages
            .iter()
            .rposition(|msg| msg.role == Role::User);

        for (i, msg) in request.messages.iter().enumerate() {
            // Images attach to the final user turn as content parts.
            let content = if Some(i) == last_user_index && !request.images.is_empty() {
                let mut parts = vec![serde_json::json!({
                    "type": "text",
                    "text": msg.content,
                })];
                for image in &request.images {
                    parts.push(serde_json::json!({
                        "type": "image_url",
                        "image_url": { "url": image.to_data_url() },
                    }));
                }
                serde_json::Value::Array(parts)
            } else {
                serde_json::Value::String(msg.content.clone())
            };

            messages.push(OpenRouterMessage {
                role: Self::role_to_string(&msg.role).to_string(),
                content,
            });
        }
        messages
    }

    /// Build the request body for testing purposes.
    #[cfg(test)]
    fn build_request_body(&self, request: &LlmRequest) -> OpenRouterRequest {
        OpenRouterRequest {
            model: self.model.clone(),
            messages: Self::build_messages(request),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = OpenRouterRequest {
            model: self.model.clone(),
            messages: Self::build_messages(&request),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(
            model = %self.model,
            messages = body.messages.len(),
            images = request.images.len(),
            "Sending OpenRouter request"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SquadError::Agent(format!("OpenRouter request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(SquadError::Agent(format!(
                "OpenRouter API error {status}: {body_text}"
            )));
        }

        let or_response: OpenRouterResponse = response.json().await.map_err(|e| {
            SquadError::Agent(format!("Failed to parse OpenRouter response: {e}"))
        })?;

        let choice = or_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SquadError::Agent("No choices in OpenRouter response".to_string()))?;

        debug!(
            model = %or_response.model,
            finish_reason = ?choice.finish_reason,
            "OpenRouter response received"
        );

        Ok(LlmResponse {
            content: choice.message.content,
            model: or_response.model,
            usage: or_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
