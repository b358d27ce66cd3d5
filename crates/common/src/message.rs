//! Chat message and attachment types shared across the squad.

use serde::{Deserialize, Serialize};

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
    Tool,
}

/// A single turn in the conversation passed to the handler.
///
/// Only the last message in a sequence is consulted by the router; earlier
/// turns are carried for the hosting process, not interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the sender
    pub role: MessageRole,

    /// Message content: plain text, or a JSON-encoded structured payload
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// An image attached to a structured request payload.
///
/// `content` is base64-encoded image data; `content_type` is the MIME type
/// (e.g. "image/png").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub name: String,

    pub content: String,

    #[serde(rename = "type")]
    pub content_type: String,
}

impl ImageAttachment {
    /// Render the attachment as a `data:` URL suitable for chat-completions
    /// image parts.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_serialization_roundtrip() {
        let msg = ChatMessage::user("Hello");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.role, MessageRole::User);
        assert_eq!(deserialized.content, "Hello");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(
            serde_json::to_string(&MessageRole::System).unwrap(),
            "\"system\""
        );
    }

    #[test]
    fn image_attachment_uses_type_key() {
        let json = r#"{"name":"photo.png","content":"aGVsbG8=","type":"image/png"}"#;
        let image: ImageAttachment = serde_json::from_str(json).unwrap();
        assert_eq!(image.name, "photo.png");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.to_data_url(), "data:image/png;base64,aGVsbG8=");
    }
}
