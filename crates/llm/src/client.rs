use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use squad_common::{ImageAttachment, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmRequest {
    pub system_prompt: Option<String>,
    pub messages: Vec<PromptMessage>,
    #[serde(default)]
    pub images: Vec<ImageAttachment>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    /// Build the common one-shot request shape: persona instructions as the
    /// system prompt, user text as the single user message.
    pub fn one_shot(
        system_prompt: impl Into<String>,
        user_text: impl Into<String>,
        images: Vec<ImageAttachment>,
    ) -> Self {
        Self {
            system_prompt: Some(system_prompt.into()),
            messages: vec![PromptMessage {
                role: Role::User,
                content: user_text.into(),
            }],
            images,
            temperature: None,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
    pub finish_reason: Option<String>,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse>;
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_message_serialization_roundtrip() {
        let msg = PromptMessage {
            role: Role::User,
            content: "Hello".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: PromptMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.role, Role::User);
        assert_eq!(deserialized.content, "Hello");
    }

    #[test]
    fn one_shot_request_shape() {
        let request = LlmRequest::one_shot("Be kind.", "She left on Tuesday", vec![]);
        assert_eq!(request.system_prompt.as_deref(), Some("Be kind."));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.messages[0].content, "She left on Tuesday");
        assert!(request.images.is_empty());
    }

    #[test]
    fn request_images_default_to_empty() {
        let json = r#"{"system_prompt":null,"messages":[],"temperature":null,"max_tokens":null}"#;
        let request: LlmRequest = serde_json::from_str(json).unwrap();
        assert!(request.images.is_empty());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
