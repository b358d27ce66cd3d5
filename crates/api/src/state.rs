//! Application state for the API server.

use squad_coordinator::{Session, SquadConfig};
use std::sync::Arc;

/// Shared application state for the API server.
pub struct AppState {
    /// The squad session handling all user turns
    pub session: Arc<Session>,

    /// Server start time (for health checks)
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state with the given squad configuration.
    pub fn new(config: SquadConfig) -> Self {
        Self {
            session: Arc::new(Session::new(config)),
            start_time: std::time::Instant::now(),
        }
    }

    /// Get the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
