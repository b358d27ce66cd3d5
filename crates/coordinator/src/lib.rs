//! Dispatch and aggregation core of the breakup recovery squad.
//!
//! The coordinator:
//! 1. Lazily initializes the four persona agents exactly once per session
//! 2. Routes each incoming turn to a dispatch mode
//! 3. Fans out to the selected agent(s) and composes the reply
//!
//! ```text
//! User turn
//!     │
//!     ▼
//! ┌──────────────┐
//! │   Session    │ ◄── mutex-guarded one-time init
//! └──────┬───────┘
//!        │ select_mode
//!   ┌────┴────────────┐
//!   ▼                 ▼
//! Chat(persona)   FullReport (4-way concurrent fan-out,
//!   single agent      fixed section order)
//! ```

pub mod config;
pub mod report;
pub mod routing;
pub mod session;

pub use config::{DeploymentConfig, MemoryConfig, SquadConfig};
pub use report::{clean_text, compose_report, AGENT_ERROR_PLACEHOLDER, REPORT_TITLE};
pub use routing::{select_mode, DispatchMode, RouteDecision};
pub use session::{AgentRegistry, Session, PROMPT_FOR_INPUT};
