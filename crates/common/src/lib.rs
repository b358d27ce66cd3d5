//! Common types shared across the recovery-squad crates.
//!
//! This crate provides the error taxonomy and the message types that the
//! router, agents, and API gateway all exchange.

pub mod error;
pub mod message;

pub use error::{Result, SquadError};
pub use message::{ChatMessage, ImageAttachment, MessageRole};
