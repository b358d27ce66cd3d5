//! Dispatch-mode selection for incoming messages.

use serde::Deserialize;
use squad_agents::Persona;
use squad_common::{ChatMessage, ImageAttachment, Result, SquadError};
use tracing::debug;

/// Plain-text messages longer than this many whitespace-delimited tokens get
/// the full report instead of a therapist chat.
const FULL_REPORT_WORD_THRESHOLD: usize = 20;

/// Which agent(s) handle a given user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Empty input; reply with the fixed prompt-for-input string.
    Prompt,

    /// Lightweight chat with a single persona.
    Chat(Persona),

    /// Aggregate all four personas into the composed report.
    FullReport,
}

/// The routing outcome for one incoming turn.
#[derive(Debug, Clone)]
pub struct RouteDecision {
    pub user_text: String,
    pub mode: DispatchMode,
    pub images: Vec<ImageAttachment>,
}

impl RouteDecision {
    fn prompt() -> Self {
        Self {
            user_text: String::new(),
            mode: DispatchMode::Prompt,
            images: Vec::new(),
        }
    }
}

/// Structured request payload carried as JSON in the message content.
/// Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct StructuredPayload {
    #[serde(default)]
    text: String,

    #[serde(default)]
    images: Vec<ImageAttachment>,

    #[serde(default)]
    mode: Option<String>,
}

/// Parse message content as a structured payload. Anything that is not a
/// JSON object with the expected key types is a payload error; callers
/// recover by treating the content as plain text.
fn parse_structured(content: &str) -> Result<StructuredPayload> {
    serde_json::from_str(content).map_err(|e| SquadError::Payload(e.to_string()))
}

/// Inspect the latest user message and select a dispatch mode.
///
/// Only the last message is consulted. Content that parses as a JSON object
/// is treated as a structured payload with optional `text`, `images`, and
/// `mode` keys; anything else goes through the plain-text heuristic:
/// "plan"/"recovery" substrings (case-insensitive) or more than twenty words
/// select the full report, short messages go to the therapist alone.
pub fn select_mode(messages: &[ChatMessage]) -> RouteDecision {
    let Some(last) = messages.last() else {
        return RouteDecision::prompt();
    };

    let content = last.content.as_str();

    // A structured payload must be a JSON object; malformed JSON or any
    // other JSON type falls back to plain-text interpretation.
    match parse_structured(content) {
        Ok(payload) => {
            let mode = match payload.mode.as_deref() {
                Some(key) => match Persona::from_key(key) {
                    Some(persona) => DispatchMode::Chat(persona),
                    // "team", or anything unrecognized, means everyone.
                    None => DispatchMode::FullReport,
                },
                None => DispatchMode::FullReport,
            };

            debug!(?mode, images = payload.images.len(), "Structured payload route");

            return RouteDecision {
                user_text: payload.text,
                mode,
                images: payload.images,
            };
        }
        Err(e) => {
            debug!(error = %e, "Content is not a structured payload");
        }
    }

    let lowered = content.to_lowercase();
    let mode = if lowered.contains("plan") || lowered.contains("recovery") {
        DispatchMode::FullReport
    } else if content.split_whitespace().count() > FULL_REPORT_WORD_THRESHOLD {
        DispatchMode::FullReport
    } else {
        DispatchMode::Chat(Persona::Therapist)
    };

    debug!(?mode, "Plain-text route");

    RouteDecision {
        user_text: content.to_string(),
        mode,
        images: Vec::new(),
    }
}
