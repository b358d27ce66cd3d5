//! HTTP route handlers for the API.

use crate::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use squad_common::ChatMessage;
use std::sync::Arc;
use tracing::info;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub initialized: bool,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        initialized: state.session.is_initialized().await,
    })
}

/// Chat request body: the full ordered message sequence for this turn.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Chat response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Send a conversation turn to the squad.
///
/// Always returns 200 with a text reply; initialization and agent failures
/// are rendered into the reply by the session itself.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let preview = request
        .messages
        .last()
        .map(|m| m.content.chars().take(50).collect::<String>())
        .unwrap_or_default();
    info!(content_preview = %preview, turns = request.messages.len(), "Received chat turn");

    let reply = state.session.handle(&request.messages).await;

    Json(ChatResponse { reply })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            version: "0.1.0",
            uptime_seconds: 100,
            initialized: true,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("initialized"));
    }

    #[test]
    fn chat_request_deserialization() {
        let json = r#"{"messages":[{"role":"user","content":"Hello"}]}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "Hello");
    }

    #[test]
    fn chat_request_messages_default_to_empty() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.messages.is_empty());
    }
}
