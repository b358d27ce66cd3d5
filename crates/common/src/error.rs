//! Error types for the recovery squad.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SquadError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Agents not initialized")]
    NotInitialized,

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Payload error: {0}")]
    Payload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SquadError>;
