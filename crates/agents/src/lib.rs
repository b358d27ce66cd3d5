//! Persona agents for the breakup recovery squad.
//!
//! Four fixed personas, each bound to the shared model client:
//!
//! - **Therapist**: emotional support and validation
//! - **Closure Specialist**: drafts a realistic closure message
//! - **Recovery Planner**: severity-scaled recovery plan
//! - **Brutal Honesty**: detached feedback, with web search attached
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  RECOVERY SQUAD                      │
//! ├──────────────────────────────────────────────────────┤
//! │                                                      │
//! │ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐     │
//! │ │Therapist│ │ Closure │ │ Planner │ │ Honesty │     │
//! │ └────┬────┘ └────┬────┘ └────┬────┘ └────┬────┘     │
//! │      │           │           │           │          │
//! │      ▼           ▼           ▼           ▼          │
//! │ ┌──────────────────────────────────────────────┐    │
//! │ │        Shared LlmClient (OpenRouter)         │    │
//! │ └──────────────────────────────────────────────┘    │
//! │                                                      │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod agent;
pub mod persona;
pub mod prompts;

pub use agent::PersonaAgent;
pub use persona::Persona;
